// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Page retrieval seam used by the extractors.
///
/// Implementations return the raw document body for 2xx responses and an
/// error for anything else (network failure, timeout, non-2xx status).
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a listing page.
    async fn fetch_listing(&self, url: &str) -> Result<String>;

    /// Fetch an article detail page.
    async fn fetch_detail(&self, url: &str) -> Result<String>;
}

/// `reqwest`-backed fetcher with a browser user agent and per-request timeouts.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    listing_timeout: Duration,
    detail_timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from crawler settings.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            listing_timeout: Duration::from_secs(config.listing_timeout_secs),
            detail_timeout: Duration::from_secs(config.detail_timeout_secs),
        })
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_listing(&self, url: &str) -> Result<String> {
        self.get(url, self.listing_timeout).await
    }

    async fn fetch_detail(&self, url: &str) -> Result<String> {
        self.get(url, self.detail_timeout).await
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(
            config.listing_timeout_secs.max(config.detail_timeout_secs),
        ))
        .build()?;
    Ok(client)
}
