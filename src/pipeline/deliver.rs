// src/pipeline/deliver.rs

//! Ordered delivery of one article's messages.

use std::time::Duration;

use crate::error::AppError;
use crate::models::OutboundMessage;
use crate::notify::Notifier;

/// What happened to an article's messages.
#[derive(Debug, Default)]
pub struct DeliveryOutcome {
    /// Messages the channel accepted, counted from the first
    pub sent: usize,

    /// The error that stopped delivery, if any
    pub error: Option<AppError>,
}

impl DeliveryOutcome {
    /// The article reached the channel; it is recorded as seen even when a
    /// later message failed.
    pub fn delivered(&self) -> bool {
        self.sent > 0
    }
}

/// Send messages in order with `spacing` between consecutive sends.
///
/// Stops at the first failure; nothing after it is attempted.
pub async fn deliver(
    notifier: &dyn Notifier,
    messages: &[OutboundMessage],
    spacing: Duration,
) -> DeliveryOutcome {
    let mut outcome = DeliveryOutcome::default();

    for (i, message) in messages.iter().enumerate() {
        if i > 0 && !spacing.is_zero() {
            tokio::time::sleep(spacing).await;
        }
        match notifier.send(message).await {
            Ok(()) => outcome.sent += 1,
            Err(e) => {
                log::error!("Failed to send {} message: {}", message.kind(), e);
                outcome.error = Some(e);
                break;
            }
        }
    }

    outcome
}
