// src/storage/seen.rs

//! Delivery record and detail-failure bookkeeping.

use std::collections::{HashMap, HashSet};

use crate::models::CanonicalKey;

/// Keys of articles already delivered. Grows for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    keys: HashSet<CanonicalKey>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.keys.contains(key)
    }

    /// Record a delivered key. Returns false if it was already present.
    pub fn insert(&mut self, key: CanonicalKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Counts consecutive detail failures per article.
///
/// With a limit of 0 nothing is ever given up on.
#[derive(Debug, Clone, Default)]
pub struct FailureLedger {
    limit: u32,
    failures: HashMap<CanonicalKey, u32>,
}

impl FailureLedger {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            failures: HashMap::new(),
        }
    }

    /// Record one failure; returns the new count.
    pub fn record_failure(&mut self, key: &CanonicalKey) -> u32 {
        let count = self.failures.entry(key.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn clear(&mut self, key: &CanonicalKey) {
        self.failures.remove(key);
    }

    /// True once the key has used up its attempts.
    pub fn exhausted(&self, key: &CanonicalKey) -> bool {
        self.limit > 0 && self.failures.get(key).is_some_and(|&n| n >= self.limit)
    }

    pub fn failures(&self, key: &CanonicalKey) -> u32 {
        self.failures.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> CanonicalKey {
        CanonicalKey::from_link(s)
    }

    #[test]
    fn test_seen_set_insert_and_contains() {
        let mut seen = SeenSet::new();
        assert!(seen.is_empty());
        assert!(seen.insert(key("https://a.com/1?x=1")));
        assert!(seen.contains(&key("https://a.com/1?x=2")));
        assert!(!seen.insert(key("https://a.com/1#frag")));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_unlimited_ledger_never_exhausts() {
        let mut ledger = FailureLedger::new(0);
        let k = key("https://a.com/poison");
        for _ in 0..100 {
            ledger.record_failure(&k);
        }
        assert!(!ledger.exhausted(&k));
        assert_eq!(ledger.failures(&k), 100);
    }

    #[test]
    fn test_limited_ledger_exhausts_and_clears() {
        let mut ledger = FailureLedger::new(2);
        let k = key("https://a.com/poison");
        assert_eq!(ledger.record_failure(&k), 1);
        assert!(!ledger.exhausted(&k));
        assert_eq!(ledger.record_failure(&k), 2);
        assert!(ledger.exhausted(&k));
        ledger.clear(&k);
        assert!(!ledger.exhausted(&k));
        assert_eq!(ledger.failures(&k), 0);
    }
}
