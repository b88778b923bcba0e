mod api;
mod canned;
mod client;
pub mod decode;
mod endpoint;
mod error;
pub mod http;
mod offline;
pub mod rate_limit;
mod select;
mod types;

pub use api::OsmApi;
pub use client::{OsmClient, DEFAULT_BASE_URL};
pub use endpoint::Endpoint;
pub use error::{ApiError, ApiErrorKind};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use offline::OfflineClient;
pub use rate_limit::RateLimitInfo;
pub use select::create_client;
pub use types::*;
