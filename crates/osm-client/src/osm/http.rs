//! HTTP transport abstraction for the OSM API
//!
//! This module provides a trait-based HTTP client that can be easily mocked for testing.
//! The transport never interprets status codes; that is the client's job.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::time::Duration;

/// Request timeout for the production transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for making HTTP requests
///
/// This abstraction allows easy mocking of HTTP calls in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Makes a GET request and returns the raw response, whatever its status
    ///
    /// An `Err` means no status line was obtained at all. A body that fails
    /// to arrive after the headers is reported through `HttpResponse::body`.
    async fn get_response(&self, url: &str) -> Result<HttpResponse>;
}

/// Response from an HTTP request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Body text, or why it could not be read
    pub body: std::result::Result<String, String>,
}

impl HttpResponse {
    /// Returns true if status is in 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if status is 429
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Canonical reason phrase for the status code
    pub fn status_text(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown status")
    }
}

/// Production HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a reqwest-based HTTP client with the default timeout
    pub fn new() -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(concat!("osm-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_response(&self, url: &str) -> Result<HttpResponse> {
        // The URL carries the API token, so strip it from any error
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request")?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read response body")
            .map_err(|e| format!("{e:#}"));

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
