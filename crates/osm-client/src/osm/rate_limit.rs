//! Rate-limit tracking from OSM response headers
//!
//! OSM reports its limiter state on every response through three headers.
//! The values are kept as the strings the server sent, since their numeric
//! format is not guaranteed.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const LIMIT_HEADER: &str = "X-RateLimit-Limit";
pub const REMAINING_HEADER: &str = "X-RateLimit-Remaining";
pub const RESET_HEADER: &str = "X-RateLimit-Reset";

/// Limiter state reported by the most recent response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    #[serde(rename = "X-RateLimit-Limit")]
    pub limit: String,
    #[serde(rename = "X-RateLimit-Remaining")]
    pub remaining: String,
    #[serde(rename = "X-RateLimit-Reset")]
    pub reset: String,
}

impl RateLimitInfo {
    /// Reads the three limiter headers; a missing header becomes an empty string
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_string(headers, LIMIT_HEADER),
            remaining: header_string(headers, REMAINING_HEADER),
            reset: header_string(headers, RESET_HEADER),
        }
    }

    /// Remaining requests in the window, if the server sent a number
    pub fn remaining_requests(&self) -> Option<u64> {
        self.remaining.trim().parse().ok()
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Holds the latest snapshot for one client
///
/// Each recorded response replaces the previous snapshot outright.
#[derive(Debug, Clone, Default)]
pub struct RateLimitTracker {
    latest: Arc<RwLock<Option<RateLimitInfo>>>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the limiter headers of a response and returns the new snapshot
    pub async fn record(&self, headers: &HeaderMap) -> RateLimitInfo {
        let info = RateLimitInfo::from_headers(headers);
        *self.latest.write().await = Some(info.clone());
        info
    }

    /// Returns the most recent snapshot, or `None` before the first response
    pub async fn latest(&self) -> Option<RateLimitInfo> {
        self.latest.read().await.clone()
    }
}
