//! Content fetching from URLs.
//!
//! A single GET per article, always bounded by the configured timeout.
//! [`FetchConfig`] and [`validate_url`] are available without the `fetch`
//! feature; the client itself is not.

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use url::Url;

use crate::{FolioError, Result};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client configuration for fetching article pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT_SECS, user_agent: "Mozilla/5.0 (compatible; Folio/0.1)".to_string() }
    }
}

/// Checks that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| FolioError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FolioError::InvalidUrl(format!(
            "{}: unsupported scheme '{}' (expected http or https)",
            url, other
        ))),
    }
}

/// Builds the shared client used for every fetch in a batch.
#[cfg(feature = "fetch")]
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(FolioError::HttpError)
}

/// Fetches HTML content from a URL.
///
/// Follows redirects, rejects non-success status codes and maps client
/// timeouts to [`FolioError::Timeout`].
#[cfg(feature = "fetch")]
pub async fn fetch_url(client: &Client, url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = validate_url(url)?;

    let map_err = |e: reqwest::Error| {
        if e.is_timeout() { FolioError::Timeout { timeout: config.timeout } } else { FolioError::HttpError(e) }
    };

    let response = client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(map_err)?
        .error_for_status()
        .map_err(FolioError::HttpError)?;

    response.text().await.map_err(map_err)
}
