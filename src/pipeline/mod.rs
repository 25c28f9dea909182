//! Pipeline entry points for the relay.
//!
//! - `Scheduler`: the poll loop that drives every cycle
//! - `deliver`: ordered, spaced sends for one article
//! - `CycleReport`: what a cycle did, per source

pub mod deliver;
pub mod report;
pub mod scheduler;

pub use deliver::{DeliveryOutcome, deliver};
pub use report::{CycleReport, SourceReport};
pub use scheduler::Scheduler;
