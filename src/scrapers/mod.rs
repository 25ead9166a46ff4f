//! Article retrieval and text extraction.
//!
//! Extraction follows a two-phase pattern:
//!
//! 1. **Fetching**: Issue one bounded-timeout HTTP request through a [`Fetcher`]
//! 2. **Extraction**: Parse the body and walk the strategy chain in [`article`]
//!
//! Bodies are decoded by [`encoding`], which honors `<meta>` charset
//! declarations as well as the `Content-Type` header.
//!
//! There is no retry and no cache. A failed request is reported once, with
//! its URL, and the run stops.

use crate::error::FetchError;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub mod article;
pub mod encoding;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The body of a successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: String,
    /// Value of the `Content-Type` header, when the server sent one.
    pub content_type: Option<String>,
}

/// Retrieves a page body for a URL.
///
/// Implementations must enforce their own timeout and report any non-2xx
/// status as a failure.
pub trait Fetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// [`Fetcher`] backed by a `reqwest` client with a request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, timeout })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url, timeout_secs = self.timeout.as_secs()))]
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let t0 = Instant::now();
        let result = async {
            let response = self.client.get(url.clone()).send().await?.error_for_status()?;
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().await?;
            let body = encoding::decode_body(&bytes, content_type.as_deref());
            Ok::<_, reqwest::Error>(FetchedPage { body, content_type })
        }
        .await;
        let elapsed_ms = t0.elapsed().as_millis();

        match result {
            Ok(page) => {
                info!(bytes = page.body.len(), elapsed_ms, "Fetched article page");
                debug!(content_type = ?page.content_type, "Response headers");
                Ok(page)
            }
            Err(e) => {
                let err = FetchError::from(e);
                warn!(elapsed_ms, error = %err, "Fetch failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds_with_timeout() {
        let fetcher = HttpFetcher::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS)).unwrap();
        assert_eq!(fetcher.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("article_sentiment/"));
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_transport_failure() {
        // port 9 on the loopback address has no listener
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();
        let url = Url::parse("http://127.0.0.1:9/article").unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_) | FetchError::Timeout));
    }
}
