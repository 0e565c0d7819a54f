//! HTTP fetcher implementation
//!
//! This module handles all requests to the catalog site, including:
//! - Building the HTTP client with the browser user agent and timeout
//! - GET requests for catalog pages
//! - Error classification (timeout, network, HTTP status)
//! - Lenient HTML parsing of the response body

use crate::config::SiteConfig;
use crate::{FetchError, FetchResult};
use reqwest::{Client, StatusCode};
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The upstream site configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use partasala_api::config::SiteConfig;
/// use partasala_api::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SiteConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches catalog pages and parses them into documents
///
/// Holds nothing but connection settings, so one instance can serve every
/// request.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: String,
}

impl Fetcher {
    /// Creates a fetcher for the configured site
    pub fn new(config: &SiteConfig) -> FetchResult<Self> {
        let client = build_http_client(config)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Origin of the catalog site, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a page and parses it into a document
    ///
    /// # Error Classification
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Request exceeds the timeout | `FetchError::Timeout` |
    /// | Any status other than 200 | `FetchError::HttpStatus` |
    /// | DNS, connect, TLS or body read failure | `FetchError::Network` |
    ///
    /// There are no retries. Malformed HTML never fails; the parser keeps
    /// whatever structure it can recover.
    pub async fn fetch_document(&self, url: &str) -> FetchResult<Html> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("{} answered {}", url, status);
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                code: status.as_u16(),
                status: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;
        tracing::trace!("Fetched {} bytes from {}", body.len(), url);

        Ok(Html::parse_document(&body))
    }
}

/// Maps a transport error onto the fetch error kinds
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
