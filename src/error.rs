// src/error.rs

//! Unified error handling for the relay.

use std::fmt;

use thiserror::Error;

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error (missing credentials, bad source definitions)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A source's listing page could not be fetched or lacked its container
    #[error("Listing error for {source_name} ({url}): {message}")]
    ListingFetch {
        source_name: String,
        url: String,
        message: String,
    },

    /// Neither the alternate nor the canonical detail page yielded content
    #[error("Detail error for {url}: {message}")]
    DetailFetch { url: String, message: String },

    /// The notification channel rejected a send
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// A cycle aborted outside per-item isolation
    #[error("Cycle aborted: {0}")]
    Unclassified(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a listing fetch error with source context.
    pub fn listing(
        source_name: impl Into<String>,
        url: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::ListingFetch {
            source_name: source_name.into(),
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a detail fetch error for an article URL.
    pub fn detail(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::DetailFetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a delivery error.
    pub fn delivery(message: impl fmt::Display) -> Self {
        Self::Delivery(message.to_string())
    }
}
