use super::rate_limit::RateLimitInfo;

/// What went wrong with an OSM API call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Missing credentials or an unusable base address; raised before any request
    Configuration,
    /// HTTP 429 from the upstream limiter
    RateLimited,
    /// Any other non-2xx status
    Http,
    /// No response was obtained (network, DNS, timeout)
    Transport,
    /// A 2xx body that could not be parsed
    Decode,
}

/// Failure value returned by every OSM API call
///
/// All failure kinds share this one shape so call sites can handle errors
/// uniformly; `kind` tells them apart when it matters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub rate_limit: Option<RateLimitInfo>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            rate_limit: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Configuration, message)
    }

    pub fn rate_limited(rate_limit: RateLimitInfo) -> Self {
        Self {
            kind: ApiErrorKind::RateLimited,
            message: "Rate limit exceeded".to_string(),
            status: Some(429),
            rate_limit: Some(rate_limit),
        }
    }

    pub fn http(status: u16, reason: &str) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ApiErrorKind::Http, format!("API request failed: {reason}"))
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    /// Returns true if the upstream service throttled the request
    pub fn is_rate_limited(&self) -> bool {
        self.kind == ApiErrorKind::RateLimited
    }
}
