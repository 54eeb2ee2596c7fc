//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with user agent and timeouts
//! - Cache-first page loading
//! - Throttling the crawl after every real network fetch

use crate::cache::{cache_key, ContentCache, HTML_EXTENSION};
use crate::config::FetchConfig;
use crate::CrawlError;
use rand::Rng;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use blog_pdf::config::FetchConfig;
/// use blog_pdf::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body
///
/// Anything other than `200 OK` is fatal: there is no retry, because a page
/// that silently went missing would end the crawl early as if the index had
/// run out.
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(CrawlError::HttpStatus)` - The server answered with a non-200 status
/// * `Err(CrawlError::Http)` - Transport failure, including timeouts
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, CrawlError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| CrawlError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| CrawlError::Http {
        url: url.to_string(),
        source,
    })
}

/// Picks a uniformly random pause in `[0, max)`
pub fn throttle_delay(max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    rand::thread_rng().gen_range(Duration::ZERO..max)
}

/// Loads pages through the HTML cache
pub struct PageFetcher {
    client: Client,
    cache: ContentCache,
    throttle_max: Duration,
    throttle: fn(Duration) -> Duration,
}

impl PageFetcher {
    pub fn new(client: Client, cache: ContentCache, throttle_max: Duration) -> Self {
        Self {
            client,
            cache,
            throttle_max,
            throttle: throttle_delay,
        }
    }

    /// Replaces the pause picker; it receives the configured maximum
    pub fn with_throttle(mut self, throttle: fn(Duration) -> Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Builds a fetcher from the fetch settings and an HTML cache
    pub fn from_config(config: &FetchConfig, cache: ContentCache) -> Result<Self, CrawlError> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, cache, config.throttle_max()))
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Returns the HTML for `url`, from the cache when possible
    ///
    /// A cache hit returns immediately. A miss performs one GET, stores the
    /// body, then sleeps a random [`throttle_delay`] before returning (or
    /// whatever [`PageFetcher::with_throttle`] picks).
    pub async fn load(&self, url: &str) -> Result<String, CrawlError> {
        let key = cache_key(url, HTML_EXTENSION);

        if let Some(cached) = self.cache.get(&key).await? {
            tracing::debug!(url, key = %key, "Cache hit");
            return Ok(String::from_utf8_lossy(&cached).into_owned());
        }

        tracing::info!(url, "URL: {}", key);
        let body = fetch_html(&self.client, url).await?;
        self.cache.save(&key, body.as_bytes()).await?;

        let pause = (self.throttle)(self.throttle_max);
        tracing::trace!("Throttling for {:?}", pause);
        tokio::time::sleep(pause).await;

        Ok(body)
    }
}
