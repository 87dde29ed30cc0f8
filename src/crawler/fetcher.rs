//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests for home and listing pages
//! - Classifying responses into success, not-found and retryable failures
//!
//! No retry logic lives here; the category crawler owns it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered 404
    NotFound,

    /// Any other non-success status or a network-level fault
    Failed {
        /// HTTP status code, if a response was received
        status_code: Option<u16>,
        /// Error description
        error: String,
    },
}

/// Source of page bodies
///
/// The crawler only ever talks to this trait, so tests can script responses
/// without a network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a single URL once
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
/// * `timeout` - Bound on the whole request, connect included
///
/// # Example
///
/// ```no_run
/// use shelf_sweep::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("ShelfSweep/1.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies the response
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success |
/// | HTTP 404 | NotFound |
/// | Other HTTP status | Failed (retryable) |
/// | Timeout / connection error | Failed (retryable) |
/// | Body read error | Failed (retryable) |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    tracing::info!("Fetching {}", url);

    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                tracing::warn!("Page not found (404): {}", url);
                return FetchResult::NotFound;
            }

            if !status.is_success() {
                tracing::warn!("HTTP {} from {}", status.as_u16(), url);
                return FetchResult::Failed {
                    status_code: Some(status.as_u16()),
                    error: format!("HTTP {}", status.as_u16()),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::Failed {
                    status_code: Some(status.as_u16()),
                    error: format!("Failed to read body: {}", e),
                },
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::warn!("Failed to fetch {}: {}", url, error);
            FetchResult::Failed {
                status_code: None,
                error,
            }
        }
    }
}
