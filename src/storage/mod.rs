//! In-memory delivery state.
//!
//! Nothing here is persisted: a restart begins with an empty seen set, and
//! the first cycle after it re-delivers whatever the sources still list.
//! The scheduler owns these values and lends them to the pipeline steps.

pub mod seen;

pub use seen::{FailureLedger, SeenSet};
