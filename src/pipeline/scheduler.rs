// src/pipeline/scheduler.rs

//! The poll loop.
//!
//! `STARTUP -> CYCLE -> SLEEP -> CYCLE -> ...`, with `CYCLE -> COOLDOWN -> CYCLE`
//! whenever a cycle aborts. Listing and detail failures are contained per
//! source and per item; anything else that escapes a cycle (including a
//! panic in an extraction rule) only costs a cooldown.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;

use crate::error::{AppError, Result};
use crate::models::{CandidateItem, Config, MessagesConfig, ScheduleConfig, SourceDefinition, SourceRegistry};
use crate::notify::{Notifier, announce};
use crate::services::{MessageFormatter, fetch_detail, fetch_listing};
use crate::storage::{FailureLedger, SeenSet};
use crate::utils::http::PageFetcher;

use super::deliver::deliver;
use super::report::{CycleReport, SourceReport};

/// Owns the delivery state and drives every cycle.
pub struct Scheduler {
    registry: Arc<SourceRegistry>,
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
    formatter: MessageFormatter,
    schedule: ScheduleConfig,
    messages: MessagesConfig,
    max_paragraphs: usize,
    seen: SeenSet,
    failures: FailureLedger,
}

impl Scheduler {
    pub fn new(
        config: &Config,
        registry: SourceRegistry,
        fetcher: Arc<dyn PageFetcher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            fetcher,
            notifier,
            formatter: MessageFormatter::new(config.format.clone(), config.messages.clone()),
            schedule: config.schedule.clone(),
            messages: config.messages.clone(),
            max_paragraphs: config.format.max_paragraphs,
            seen: SeenSet::new(),
            failures: FailureLedger::new(config.schedule.detail_retry_limit),
        }
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Announce the relay on the channel, if configured. A failed
    /// announcement is logged and otherwise ignored.
    pub async fn startup(&self) {
        log::info!(
            "Relay starting with {} source(s), polling every {}s",
            self.registry.len(),
            self.schedule.poll_interval_secs
        );
        if self.schedule.announce_on_startup {
            if let Err(e) = announce(self.notifier.as_ref(), &self.messages.startup).await {
                log::warn!("Startup announcement failed: {e}");
            }
        }
    }

    /// Run until the process is terminated.
    pub async fn run_forever(&mut self) {
        self.startup().await;
        loop {
            let pause = match self.guarded_cycle().await {
                Some(_) => {
                    log::info!("Waiting {}s for the next cycle", self.schedule.poll_interval_secs);
                    Duration::from_secs(self.schedule.poll_interval_secs)
                }
                None => Duration::from_secs(self.schedule.cooldown_secs),
            };
            tokio::time::sleep(pause).await;
        }
    }

    /// One cycle behind the outermost safety net. `None` means the cycle
    /// aborted and the caller should cool down.
    pub async fn guarded_cycle(&mut self) -> Option<CycleReport> {
        let cooldown = self.schedule.cooldown_secs;
        match AssertUnwindSafe(self.run_cycle()).catch_unwind().await {
            Ok(Ok(report)) => Some(report),
            Ok(Err(e)) => {
                log::error!("Cycle aborted: {e}. Cooling down {cooldown}s");
                None
            }
            Err(payload) => {
                let e = AppError::Unclassified(panic_message(&*payload).to_string());
                log::error!("{e}. Cooling down {cooldown}s");
                None
            }
        }
    }

    /// Visit every source once, in registry order.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let started_at = Utc::now();
        let registry = Arc::clone(&self.registry);

        let mut sources = Vec::with_capacity(registry.len());
        for source in registry.iter() {
            let report = self.run_source(source).await?;
            log::info!(
                "{}: {} new | {} delivered in total",
                source.name,
                report.delivered,
                self.seen.len()
            );
            sources.push(report);
        }

        let report = CycleReport {
            started_at,
            finished_at: Utc::now(),
            sources,
            seen_total: self.seen.len(),
        };

        if report.is_idle() {
            log::info!("No new items this cycle");
            if self.schedule.notify_when_idle {
                if let Err(e) = announce(self.notifier.as_ref(), &self.messages.idle).await {
                    log::warn!("Idle notice failed: {e}");
                }
            }
        }
        Ok(report)
    }

    async fn run_source(&mut self, source: &SourceDefinition) -> Result<SourceReport> {
        let mut report = SourceReport::new(&source.name);

        let items = match fetch_listing(self.fetcher.as_ref(), source).await {
            Ok(items) => items,
            Err(e @ AppError::ListingFetch { .. }) => {
                log::warn!("{e}");
                report.error = Some(e.to_string());
                return Ok(report);
            }
            Err(e) => return Err(e),
        };
        report.candidates = items.len();

        for item in items {
            self.process_item(source, item, &mut report).await?;
        }
        Ok(report)
    }

    async fn process_item(
        &mut self,
        source: &SourceDefinition,
        item: CandidateItem,
        report: &mut SourceReport,
    ) -> Result<()> {
        let key = item.key();
        if self.seen.contains(&key) {
            log::debug!("Already delivered: {key}");
            return Ok(());
        }
        if self.failures.exhausted(&key) {
            log::debug!("Abandoned after repeated detail failures: {key}");
            report.abandoned += 1;
            return Ok(());
        }
        report.new += 1;

        let detail =
            match fetch_detail(self.fetcher.as_ref(), source, &item.link, self.max_paragraphs).await {
                Ok(detail) => detail,
                Err(e @ AppError::DetailFetch { .. }) => {
                    let attempts = self.failures.record_failure(&key);
                    report.empty += 1;
                    if self.failures.exhausted(&key) {
                        log::warn!("Giving up on {key} after {attempts} failed detail fetches: {e}");
                    } else {
                        log::warn!("Skipping for now, no content: {e}");
                    }
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

        let messages = self.formatter.format(&item, &detail);
        let outcome = deliver(
            self.notifier.as_ref(),
            &messages,
            Duration::from_secs(self.schedule.message_delay_secs),
        )
        .await;

        if !outcome.delivered() {
            report.failed += 1;
            return Ok(());
        }

        if outcome.error.is_some() {
            log::warn!(
                "{} partially delivered ({}/{} messages)",
                item.link,
                outcome.sent,
                messages.len()
            );
        }
        self.seen.insert(key.clone());
        self.failures.clear(&key);
        report.delivered += 1;
        log::info!("Delivered: {}", item.title);

        if self.schedule.item_delay_secs > 0 {
            tokio::time::sleep(Duration::from_secs(self.schedule.item_delay_secs)).await;
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("panic with a non-string payload")
}
