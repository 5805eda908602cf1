//! HTTP client creation and request handling for news feeds.

use async_trait::async_trait;
use reqwest::{cookie::Jar, header};
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::types::REQUEST_TIMEOUT;
use super::util::decompress;
use crate::error::IntelError;
use crate::TARGET_WEB_REQUEST;

const STANDARD_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:138.0) Gecko/20100101 Firefox/138.0";
/// Standard request plus one browser-emulation retry.
const FETCH_ATTEMPTS: u32 = 2;
const FEED_ACCEPT: &str = "application/feed+json, application/json, application/rss+xml, application/atom+xml, application/xml, text/xml, */*;q=0.9";

/// Retrieves the raw body of a feed document.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, IntelError>;
}

/// Create a client with either standard or browser emulation settings
pub fn create_http_client(browser_emulation: bool) -> Result<reqwest::Client, IntelError> {
    let builder = reqwest::Client::builder()
        .cookie_store(true)
        .cookie_provider(Arc::new(Jar::default()))
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default());

    if browser_emulation {
        debug!(target: TARGET_WEB_REQUEST, "Creating browser emulation HTTP client");
    } else {
        debug!(target: TARGET_WEB_REQUEST, "Creating standard HTTP client");
    }

    builder
        .build()
        .map_err(|e| IntelError::Fetch(format!("Failed to build HTTP client: {}", e)))
}

/// Fetches feeds over HTTP(S), retrying once with browser-like headers.
pub struct HttpFeedFetcher {
    standard: reqwest::Client,
    browser: reqwest::Client,
    request_timeout: Duration,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self, IntelError> {
        Ok(Self {
            standard: create_http_client(false)?,
            browser: create_http_client(true)?,
            request_timeout: REQUEST_TIMEOUT,
        })
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Splits a whole-feed time budget evenly across both attempts, so the
    /// browser-emulation retry still runs when the standard request times out.
    pub fn with_feed_budget(self, feed_timeout: Duration) -> Self {
        self.with_request_timeout(feed_timeout / FETCH_ATTEMPTS)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Attempt to fetch a URL with fallback to browser emulation if the standard fetch fails.
    pub async fn fetch_with_fallback(
        &self,
        url: &str,
    ) -> Result<(reqwest::Response, bool), IntelError> {
        debug!(target: TARGET_WEB_REQUEST, "Attempting standard request to {}", url);

        let standard_result = timeout(
            self.request_timeout,
            self.standard
                .get(url)
                .header(header::USER_AGENT, STANDARD_USER_AGENT)
                .header(header::ACCEPT, FEED_ACCEPT)
                .header(header::ACCEPT_ENCODING, "gzip, deflate, br")
                .send(),
        )
        .await;

        let first_failure = match standard_result {
            Ok(Ok(resp)) if resp.status().is_success() => {
                debug!(target: TARGET_WEB_REQUEST, "Standard request to {} succeeded", url);
                return Ok((resp, false));
            }
            Ok(Ok(resp)) => format!("HTTP error: {}", resp.status()),
            Ok(Err(err)) => format!("Request failed: {}", err),
            Err(_) => format!(
                "Request timed out after {} seconds",
                self.request_timeout.as_secs()
            ),
        };
        debug!(target: TARGET_WEB_REQUEST, "Standard request to {} failed ({}), trying browser emulation", url, first_failure);

        let browser_result = timeout(
            self.request_timeout,
            self.browser
                .get(url)
                .header(header::USER_AGENT, BROWSER_USER_AGENT)
                .header(
                    header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
                .header(header::ACCEPT_ENCODING, "gzip, deflate, br")
                .header("DNT", "1")
                .header("Upgrade-Insecure-Requests", "1")
                .header("Sec-Fetch-Dest", "document")
                .header("Sec-Fetch-Mode", "navigate")
                .header("Sec-Fetch-Site", "none")
                .header("Sec-Fetch-User", "?1")
                .send(),
        )
        .await;

        let second_failure = match browser_result {
            Ok(Ok(resp)) if resp.status().is_success() => {
                info!(target: TARGET_WEB_REQUEST, "Browser emulation request to {} succeeded", url);
                return Ok((resp, true));
            }
            Ok(Ok(resp)) => format!("Browser emulation HTTP error: {}", resp.status()),
            Ok(Err(err)) => format!("Browser emulation request failed: {}", err),
            Err(_) => format!(
                "Browser emulation request timed out after {} seconds",
                self.request_timeout.as_secs()
            ),
        };

        Err(IntelError::Fetch(format!(
            "{}: {}; {}",
            url, first_failure, second_failure
        )))
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, IntelError> {
        let (response, browser_emulation_used) = self.fetch_with_fallback(url).await?;
        if browser_emulation_used {
            info!(target: TARGET_WEB_REQUEST, "Browser emulation was required for {}", url);
        }

        let content_encoding = response
            .headers()
            .get(header::CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .map(|s| s.to_lowercase());

        let bytes = response.bytes().await?;
        let decompressed = decompress(&bytes, content_encoding.as_deref(), url);

        match String::from_utf8(decompressed) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(target: TARGET_WEB_REQUEST, "Feed {} is not valid UTF-8, decoding lossily", url);
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_budget_leaves_room_for_retry() {
        let fetcher = HttpFeedFetcher::new()
            .unwrap()
            .with_feed_budget(Duration::from_secs(8));
        assert_eq!(fetcher.request_timeout(), Duration::from_secs(4));
        assert!(fetcher.request_timeout() * FETCH_ATTEMPTS <= Duration::from_secs(8));
    }

    #[test]
    fn test_default_request_timeout() {
        let fetcher = HttpFeedFetcher::new().unwrap();
        assert_eq!(fetcher.request_timeout(), REQUEST_TIMEOUT);
    }
}
