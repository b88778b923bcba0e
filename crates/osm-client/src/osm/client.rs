use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::OsmApi;
use super::decode::decode_body;
use super::endpoint::Endpoint;
use super::error::ApiError;
use super::http::{HttpClient, ReqwestClient};
use super::rate_limit::{RateLimitInfo, RateLimitTracker};
use super::types::*;
use crate::config::ClientConfig;

pub const DEFAULT_BASE_URL: &str = "https://www.onlinescoutmanager.co.uk";

type Query = Vec<(&'static str, String)>;

/// Online Scout Manager API client
///
/// Generic over the HTTP client implementation for testability.
pub struct OsmClient<H: HttpClient = ReqwestClient> {
    http: H,
    api_id: String,
    api_token: String,
    base_url: Url,
    rate_limits: RateLimitTracker,
}

impl OsmClient<ReqwestClient> {
    /// Creates a client against the production host
    pub fn new(api_id: impl Into<String>, api_token: impl Into<String>) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(api_id, api_token))
    }

    /// Creates a client with the default HTTP implementation
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = ReqwestClient::new().map_err(|e| ApiError::configuration(format!("{e:#}")))?;
        Self::with_http_client(config, http)
    }
}

impl<H: HttpClient> OsmClient<H> {
    /// Creates a client over a custom HTTP implementation
    ///
    /// Fails with a configuration error if either credential is empty or the
    /// base address does not parse.
    pub fn with_http_client(config: &ClientConfig, http: H) -> Result<Self, ApiError> {
        if !config.has_credentials() {
            return Err(ApiError::configuration(
                "Missing OSM API credentials. Set OSM_API_ID and OSM_API_TOKEN, \
                 or set USE_MOCK_DATA=true to use mock data.",
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::configuration(format!("Invalid OSM base URL {:?}: {e}", config.base_url))
        })?;

        Ok(Self {
            http,
            api_id: config.api_id.clone(),
            api_token: config.api_token.clone(),
            base_url,
            rate_limits: RateLimitTracker::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL: credentials first, then params in the given order
    fn build_url(&self, endpoint: &Endpoint, params: &[(&'static str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(&endpoint.path()).map_err(|e| {
            ApiError::configuration(format!("Invalid endpoint path {}: {e}", endpoint.path()))
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("apiid", &self.api_id);
            query.append_pair("token", &self.api_token);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Makes one authenticated GET request and decodes the body
    ///
    /// The rate-limit snapshot is replaced by every response, including
    /// failed ones. There is no retry.
    async fn request<T: DeserializeOwned + Send>(
        &self,
        endpoint: Endpoint,
        params: Query,
    ) -> Result<T, ApiError> {
        let url = self.build_url(&endpoint, &params)?;
        let path = endpoint.path();
        tracing::debug!(endpoint = %path, params = params.len(), "OSM API request");

        let response = self.http.get_response(url.as_str()).await.map_err(|e| {
            tracing::warn!(endpoint = %path, "OSM API transport error: {e:#}");
            ApiError::transport(format!("{e:#}"))
        })?;

        let rate_limit = self.rate_limits.record(&response.headers).await;

        if response.is_rate_limited() {
            tracing::warn!(
                endpoint = %path,
                reset = %rate_limit.reset,
                "OSM API rate limit exceeded"
            );
            return Err(ApiError::rate_limited(rate_limit));
        }

        if !response.is_success() {
            tracing::warn!(endpoint = %path, status = response.status, "OSM API error");
            return Err(ApiError::http(response.status, response.status_text()));
        }

        let body = response.body.map_err(|reason| {
            tracing::warn!(endpoint = %path, "OSM API transport error: {reason}");
            ApiError::transport(reason)
        })?;

        decode_body(&endpoint, &body)
    }
}

#[async_trait]
impl<H: HttpClient> OsmApi for OsmClient<H> {
    async fn rate_limit_info(&self) -> Option<RateLimitInfo> {
        self.rate_limits.latest().await
    }

    async fn get_startup_data(&self) -> Result<StartupData, ApiError> {
        self.request(Endpoint::Startup, Vec::new()).await
    }

    async fn get_member_list(
        &self,
        params: &MemberListParams,
    ) -> Result<MemberListResponse, ApiError> {
        let mut query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("termid", params.termid.clone()),
        ];
        if let Some(sort) = params.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
        if let Some(section) = params.section {
            query.push(("section", section.as_str().to_string()));
        }
        self.request(Endpoint::MemberList, query).await
    }

    async fn get_individual_member(
        &self,
        params: &IndividualMemberParams,
    ) -> Result<IndividualMemberInfo, ApiError> {
        let mut query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("scoutid", params.scoutid.clone()),
            ("termid", params.termid.clone()),
        ];
        if let Some(context) = params.context.as_deref().filter(|c| !c.is_empty()) {
            query.push(("context", context.to_string()));
        }
        self.request(Endpoint::IndividualMember, query).await
    }

    async fn get_patrols(&self, params: &PatrolsParams) -> Result<PatrolsResponse, ApiError> {
        let mut query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("termid", params.termid.clone()),
        ];
        if let Some(flag) = params.include_no_patrol {
            query.push(("include_no_patrol", flag.as_str().to_string()));
        }
        self.request(Endpoint::Patrols, query).await
    }

    async fn get_census_details(&self, params: &CensusParams) -> Result<CensusResponse, ApiError> {
        let query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("termid", params.termid.clone()),
        ];
        self.request(Endpoint::Census, query).await
    }

    async fn get_flexi_records(
        &self,
        params: &FlexiRecordsParams,
    ) -> Result<FlexiRecordsResponse, ApiError> {
        let mut query: Query = vec![("sectionid", params.sectionid.clone())];
        if let Some(flag) = params.archived {
            query.push(("archived", flag.as_str().to_string()));
        }
        self.request(Endpoint::FlexiRecords, query).await
    }

    async fn get_member_transfers(
        &self,
        params: &MemberTransfersParams,
    ) -> Result<MemberTransfersResponse, ApiError> {
        let query: Query = vec![
            ("mode", params.mode.clone()),
            ("section_id", params.section_id.clone()),
        ];
        self.request(Endpoint::MemberTransfers, query).await
    }

    async fn get_deletable_members(
        &self,
        section_id: &str,
    ) -> Result<DeletableMembersResponse, ApiError> {
        let endpoint = Endpoint::DeletableMembers {
            section_id: section_id.to_string(),
        };
        self.request(endpoint, Vec::new()).await
    }

    async fn get_programme_summary(
        &self,
        params: &ProgrammeSummaryParams,
    ) -> Result<ProgrammeSummaryResponse, ApiError> {
        let query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("termid", params.termid.clone()),
        ];
        let response: ProgrammeSummaryResponse =
            self.request(Endpoint::ProgrammeSummary, query).await?;
        tracing::debug!(items = response.items.len(), "Fetched programme summary");
        Ok(response)
    }

    async fn get_badge_tag_cloud(
        &self,
        params: &BadgeTagCloudParams,
    ) -> Result<BadgeTagCloud, ApiError> {
        let query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("termid", params.termid.clone()),
            ("section", params.section.as_str().to_string()),
        ];
        self.request(Endpoint::BadgeTagCloud, query).await
    }

    async fn get_risk_assessment_categories(
        &self,
        section_id: &str,
    ) -> Result<RiskAssessmentResponse, ApiError> {
        let endpoint = Endpoint::RiskAssessmentCategories {
            section_id: section_id.to_string(),
        };
        self.request(endpoint, Vec::new()).await
    }

    async fn get_programme_detail(
        &self,
        params: &ProgrammeDetailParams,
    ) -> Result<ProgrammeDetailResponse, ApiError> {
        let query: Query = vec![
            ("sectionid", params.sectionid.clone()),
            ("termid", params.termid.clone()),
            ("eveningid", params.eveningid.clone()),
        ];
        self.request(Endpoint::ProgrammeDetail, query).await
    }

    async fn get_programme_attachments(
        &self,
        params: &ProgrammeAttachmentsParams,
    ) -> Result<Value, ApiError> {
        let path = params
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("/");
        let query: Query = vec![
            ("section_id", params.section_id.clone()),
            ("id", params.id.clone()),
            ("evening_id", params.evening_id.clone()),
            ("path", path.to_string()),
            ("temp", params.temp.unwrap_or(false).to_string()),
            ("upload_mode", "programme".to_string()),
        ];
        self.request(Endpoint::ProgrammeAttachments, query).await
    }
}
