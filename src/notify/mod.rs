// src/notify/mod.rs

//! Notification channel.
//!
//! The pipeline only talks to [`Notifier`]; the Telegram Bot API client is
//! the production implementation.

pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::OutboundMessage;
use crate::utils::text::escape;

pub use telegram::TelegramNotifier;

/// A destination for outbound messages.
///
/// Any error counts as a failed send; implementations do not retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}

/// Send a plain operational notice (startup, idle) as a text message.
pub async fn announce(notifier: &dyn Notifier, text: &str) -> Result<()> {
    notifier
        .send(&OutboundMessage::Text {
            text: escape(text),
            disable_preview: true,
        })
        .await
}
