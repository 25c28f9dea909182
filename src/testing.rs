// src/testing.rs

//! In-memory doubles for the fetch and notify seams.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::{AppError, Result};
use crate::models::OutboundMessage;
use crate::notify::Notifier;
use crate::utils::http::PageFetcher;

/// Serves canned pages and records every URL asked for. Unknown URLs fail
/// like a 404.
#[derive(Default)]
pub struct StaticFetcher {
    pages: Mutex<HashMap<String, String>>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        let fetcher = Self::default();
        for (url, body) in pages {
            fetcher.set(url, body);
        }
        fetcher
    }

    pub fn set(&self, url: &str, body: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn get(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::detail(url, "HTTP status 404 Not Found"))
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_listing(&self, url: &str) -> Result<String> {
        self.get(url)
    }

    async fn fetch_detail(&self, url: &str) -> Result<String> {
        self.get(url)
    }
}

/// Records sends with the (paused) clock time they happened at.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(Instant, OutboundMessage)>>,
    calls: Mutex<usize>,
    failing_calls: Mutex<HashSet<usize>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the nth call from now on (0-based, counted over all calls) fail.
    pub fn fail_call(&self, n: usize) {
        self.failing_calls.lock().unwrap().insert(n);
    }

    /// Make every call fail until cleared.
    pub fn fail_all(&self, on: bool) {
        let mut failing = self.failing_calls.lock().unwrap();
        if on {
            failing.insert(usize::MAX);
        } else {
            failing.remove(&usize::MAX);
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn sent_at(&self) -> Vec<Instant> {
        self.sent.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    /// Bodies of the successful sends, in order.
    pub fn bodies(&self) -> Vec<String> {
        self.sent()
            .iter()
            .map(|m| m.body().to_string())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls - 1
        };
        let failing = self.failing_calls.lock().unwrap();
        if failing.contains(&call) || failing.contains(&usize::MAX) {
            return Err(AppError::delivery("Bad Request: chat not found"));
        }
        drop(failing);
        self.sent
            .lock()
            .unwrap()
            .push((Instant::now(), message.clone()));
        Ok(())
    }
}
