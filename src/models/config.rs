//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SourceConfig;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetching behavior
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Poll loop timing and behavior
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Message size limits
    #[serde(default)]
    pub format: FormatConfig,

    /// User-visible strings
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Liveness endpoint
    #[serde(default)]
    pub health: HealthConfig,

    /// Extra sources; the built-in registry is used when empty
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if the file is missing or broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.listing_timeout_secs == 0 || self.crawler.detail_timeout_secs == 0 {
            return Err(AppError::config("crawler timeouts must be > 0"));
        }
        if self.schedule.poll_interval_secs == 0 {
            return Err(AppError::config("schedule.poll_interval_secs must be > 0"));
        }
        if self.format.max_paragraphs == 0 {
            return Err(AppError::config("format.max_paragraphs must be > 0"));
        }
        if self.format.caption_limit == 0 || self.format.caption_limit > CAPTION_HARD_LIMIT {
            return Err(AppError::config(format!(
                "format.caption_limit must be within 1..={CAPTION_HARD_LIMIT}"
            )));
        }
        if self.format.text_limit == 0 || self.format.text_limit > TEXT_HARD_LIMIT {
            return Err(AppError::config(format!(
                "format.text_limit must be within 1..={TEXT_HARD_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// Telegram caption ceiling in UTF-16 code units.
pub const CAPTION_HARD_LIMIT: usize = 1024;

/// Telegram text message ceiling in UTF-16 code units.
pub const TEXT_HARD_LIMIT: usize = 4096;

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Listing page timeout in seconds
    #[serde(default = "defaults::listing_timeout")]
    pub listing_timeout_secs: u64,

    /// Detail page timeout in seconds
    #[serde(default = "defaults::detail_timeout")]
    pub detail_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            listing_timeout_secs: defaults::listing_timeout(),
            detail_timeout_secs: defaults::detail_timeout(),
        }
    }
}

/// Poll loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Sleep between full cycles
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,

    /// Sleep after a cycle aborted unexpectedly
    #[serde(default = "defaults::cooldown")]
    pub cooldown_secs: u64,

    /// Spacing between the messages of one item
    #[serde(default = "defaults::message_delay")]
    pub message_delay_secs: u64,

    /// Spacing after each delivered item
    #[serde(default = "defaults::item_delay")]
    pub item_delay_secs: u64,

    /// Send the startup announcement
    #[serde(default = "defaults::enabled")]
    pub announce_on_startup: bool,

    /// Tell the channel when a cycle found nothing new
    #[serde(default)]
    pub notify_when_idle: bool,

    /// Give up on an item after this many failed detail fetches (0 = never)
    #[serde(default)]
    pub detail_retry_limit: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: defaults::poll_interval(),
            cooldown_secs: defaults::cooldown(),
            message_delay_secs: defaults::message_delay(),
            item_delay_secs: defaults::item_delay(),
            announce_on_startup: defaults::enabled(),
            notify_when_idle: false,
            detail_retry_limit: 0,
        }
    }
}

/// Message composition limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Body characters included in the long form
    #[serde(default = "defaults::excerpt_chars")]
    pub excerpt_chars: usize,

    /// Paragraphs kept from a detail page
    #[serde(default = "defaults::max_paragraphs")]
    pub max_paragraphs: usize,

    #[serde(default = "defaults::caption_limit")]
    pub caption_limit: usize,

    #[serde(default = "defaults::text_limit")]
    pub text_limit: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: defaults::excerpt_chars(),
            max_paragraphs: defaults::max_paragraphs(),
            caption_limit: defaults::caption_limit(),
            text_limit: defaults::text_limit(),
        }
    }
}

/// Strings shown to channel readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "defaults::msg_startup")]
    pub startup: String,

    #[serde(default = "defaults::msg_idle")]
    pub idle: String,

    /// Link label in photo captions
    #[serde(default = "defaults::msg_read_full")]
    pub read_full: String,

    /// Link label in the long form
    #[serde(default = "defaults::msg_continue_reading")]
    pub continue_reading: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            startup: defaults::msg_startup(),
            idle: defaults::msg_idle(),
            read_full: defaults::msg_read_full(),
            continue_reading: defaults::msg_continue_reading(),
        }
    }
}

/// Liveness endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    #[serde(default = "defaults::health_bind")]
    pub bind: String,

    #[serde(default = "defaults::health_body")]
    pub body: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            bind: defaults::health_bind(),
            body: defaults::health_body(),
        }
    }
}

/// Bot API credentials. Kept out of the config file and out of `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Both values trimmed and non-blank, or a configuration error naming
    /// the first one missing.
    pub fn from_parts(bot_token: Option<String>, chat_id: Option<String>) -> Result<Self> {
        let present = |value: Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        match (present(bot_token), present(chat_id)) {
            (Some(bot_token), Some(chat_id)) => Ok(Self { bot_token, chat_id }),
            (None, _) => Err(AppError::config("BOT_TOKEN is not set")),
            (_, None) => Err(AppError::config("CHAT_ID is not set")),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
            .into()
    }
    pub fn listing_timeout() -> u64 {
        10
    }
    pub fn detail_timeout() -> u64 {
        15
    }

    // Schedule defaults
    pub fn poll_interval() -> u64 {
        600
    }
    pub fn cooldown() -> u64 {
        60
    }
    pub fn message_delay() -> u64 {
        2
    }
    pub fn item_delay() -> u64 {
        5
    }
    pub fn enabled() -> bool {
        true
    }

    // Format defaults
    pub fn excerpt_chars() -> usize {
        800
    }
    pub fn max_paragraphs() -> usize {
        5
    }
    pub fn caption_limit() -> usize {
        super::CAPTION_HARD_LIMIT
    }
    pub fn text_limit() -> usize {
        super::TEXT_HARD_LIMIT
    }

    // Message defaults
    pub fn msg_startup() -> String {
        "🤖 Bot de noticias multi-fuente activado".into()
    }
    pub fn msg_idle() -> String {
        "No hay noticias nuevas".into()
    }
    pub fn msg_read_full() -> String {
        "Leer completa".into()
    }
    pub fn msg_continue_reading() -> String {
        "Continuar leyendo".into()
    }

    // Health defaults
    pub fn health_bind() -> String {
        "0.0.0.0:8080".into()
    }
    pub fn health_body() -> String {
        "🤖 Bot multi-fuente funcionando".into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_caption_above_channel_limit() {
        let mut config = Config::default();
        config.format.caption_limit = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_poll_interval() {
        let mut config = Config::default();
        config.schedule.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_match_service_timing() {
        let config = Config::default();
        assert_eq!(config.schedule.poll_interval_secs, 600);
        assert_eq!(config.schedule.cooldown_secs, 60);
        assert_eq!(config.crawler.listing_timeout_secs, 10);
        assert_eq!(config.crawler.detail_timeout_secs, 15);
        assert!(config.schedule.announce_on_startup);
        assert!(!config.schedule.notify_when_idle);
        assert!(config.sources.is_empty());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [schedule]
            poll_interval_secs = 120
            notify_when_idle = true

            [[sources]]
            name = "Ejemplo"
            url = "https://www.example.com/entretenimiento"
            container = "div.article-list"
            items = "div.article"
            title = "h3 a"
            link = "h3 a"
            "#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.schedule.poll_interval_secs, 120);
        assert!(config.schedule.notify_when_idle);
        assert_eq!(config.schedule.cooldown_secs, 60);
        assert_eq!(config.format.text_limit, TEXT_HARD_LIMIT);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].detail.text, "p");
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.schedule.poll_interval_secs, 600);
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[schedule\npoll_interval_secs = ").unwrap();
        assert!(matches!(Config::load(file.path()), Err(AppError::Toml(_))));
    }

    #[test]
    fn credentials_are_trimmed() {
        let creds =
            Credentials::from_parts(Some(" 123:abc \n".into()), Some("-100200".into())).unwrap();
        assert_eq!(creds.bot_token, "123:abc");
        assert_eq!(creds.chat_id, "-100200");
    }

    #[test]
    fn credentials_missing_token() {
        let err = Credentials::from_parts(None, Some("-100200".into())).unwrap_err();
        assert!(matches!(&err, AppError::Config(msg) if msg.contains("BOT_TOKEN")));
    }

    #[test]
    fn credentials_missing_chat_id() {
        let err = Credentials::from_parts(Some("123:abc".into()), None).unwrap_err();
        assert!(matches!(&err, AppError::Config(msg) if msg.contains("CHAT_ID")));
    }

    #[test]
    fn credentials_blank_counts_as_missing() {
        let err = Credentials::from_parts(Some("   ".into()), Some("-100200".into())).unwrap_err();
        assert!(matches!(&err, AppError::Config(msg) if msg.contains("BOT_TOKEN")));

        let err = Credentials::from_parts(Some("123:abc".into()), Some("\t".into())).unwrap_err();
        assert!(matches!(&err, AppError::Config(msg) if msg.contains("CHAT_ID")));
    }

    #[test]
    fn credentials_debug_hides_token() {
        let creds = Credentials::from_parts(Some("123:secret".into()), Some("42".into())).unwrap();
        let shown = format!("{creds:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("42"));
    }
}
