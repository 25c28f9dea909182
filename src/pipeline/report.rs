// src/pipeline/report.rs

//! Per-cycle statistics.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts for one source in one cycle.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,

    /// Items read off the listing page
    pub candidates: usize,

    /// Items not yet seen
    pub new: usize,

    /// Items that reached the channel
    pub delivered: usize,

    /// Items with no usable detail content (retried next cycle)
    pub empty: usize,

    /// Items whose first message was rejected
    pub failed: usize,

    /// Items past their detail retry limit
    pub abandoned: usize,

    /// Listing error, if the source was aborted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

/// Result of one full pass over the registry.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,

    /// Seen-set size after the cycle
    pub seen_total: usize,
}

impl CycleReport {
    pub fn delivered(&self) -> usize {
        self.sources.iter().map(|s| s.delivered).sum()
    }

    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.error.is_some()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.delivered() == 0
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = (self.finished_at - self.started_at).num_seconds();
        writeln!(
            f,
            "Cycle {} ({secs}s): {} delivered, {} seen in total",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.delivered(),
            self.seen_total
        )?;
        for s in &self.sources {
            match &s.error {
                Some(e) => writeln!(f, "  {}: failed ({e})", s.source)?,
                None => writeln!(
                    f,
                    "  {}: {} listed, {} new, {} delivered, {} empty, {} failed",
                    s.source, s.candidates, s.new, s.delivered, s.empty, s.failed
                )?,
            }
        }
        Ok(())
    }
}
