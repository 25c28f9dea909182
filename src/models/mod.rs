// src/models/mod.rs

//! Domain models for the relay.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

pub mod builtin;
mod config;
mod item;
mod message;
mod registry;
pub mod selectors;
pub mod source;

// Re-export all public types
pub use config::{
    CAPTION_HARD_LIMIT, Config, CrawlerConfig, Credentials, FormatConfig, HealthConfig,
    MessagesConfig, ScheduleConfig, TEXT_HARD_LIMIT,
};
pub use item::{CandidateItem, CanonicalKey, DetailContent};
pub use message::OutboundMessage;
pub use registry::SourceRegistry;
pub use selectors::{DetailSelectors, FieldSelector, SourceConfig};
pub use source::{DetailRules, ExtractFn, FieldRule, SourceDefinition};
