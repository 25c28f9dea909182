// src/notify/telegram.rs

//! Telegram Bot API client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use super::Notifier;
use crate::error::{AppError, Result};
use crate::models::OutboundMessage;

const API_BASE: &str = "https://api.telegram.org";

/// Posts messages to one chat through `sendMessage` and `sendPhoto`.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

/// The envelope every Bot API method replies with.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(client: Client, token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            api_base: API_BASE.to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Point at a different API host (local Bot API server, test double).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Bot API method and JSON body for a message.
    fn request(&self, message: &OutboundMessage) -> (&'static str, Value) {
        match message {
            OutboundMessage::Photo { url, caption } => (
                "sendPhoto",
                json!({
                    "chat_id": self.chat_id,
                    "photo": url,
                    "caption": caption,
                    "parse_mode": "HTML",
                }),
            ),
            OutboundMessage::Text {
                text,
                disable_preview,
            } => (
                "sendMessage",
                json!({
                    "chat_id": self.chat_id,
                    "text": text,
                    "parse_mode": "HTML",
                    "disable_web_page_preview": disable_preview,
                }),
            ),
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let (method, body) = self.request(message);
        let response = self
            .client
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("{method}: {}", e.without_url())))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        check_response(method, status, &text)
    }
}

/// Turn a Bot API reply into a result.
fn check_response(method: &str, status: StatusCode, body: &str) -> Result<()> {
    let parsed: Option<ApiResponse> = serde_json::from_str(body).ok();
    match parsed {
        Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
        Some(ApiResponse { description, .. }) => Err(AppError::delivery(format!(
            "{method} returned {status}: {}",
            description.unwrap_or_else(|| "no description".into())
        ))),
        None => Err(AppError::delivery(format!(
            "{method} returned {status} with an unreadable body"
        ))),
    }
}
