use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::time::Duration;

use super::api::OsmApi;
use super::canned;
use super::error::ApiError;
use super::rate_limit::RateLimitInfo;
use super::types::*;

/// Simulated latency per call
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Offline stand-in for the OSM API
///
/// Answers every report from canned data after a short delay. Never touches
/// the network and never fails; its limiter is always healthy.
#[derive(Debug, Clone)]
pub struct OfflineClient {
    delay: Duration,
    rate_limit: RateLimitInfo,
}

impl OfflineClient {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    /// Creates an offline client with a custom simulated latency
    pub fn with_delay(delay: Duration) -> Self {
        let reset = Utc::now() + chrono::Duration::hours(1);
        Self {
            delay,
            rate_limit: RateLimitInfo {
                limit: "1000".to_string(),
                remaining: "999".to_string(),
                reset: reset.timestamp_millis().to_string(),
            },
        }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for OfflineClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OsmApi for OfflineClient {
    async fn rate_limit_info(&self) -> Option<RateLimitInfo> {
        Some(self.rate_limit.clone())
    }

    async fn get_startup_data(&self) -> Result<StartupData, ApiError> {
        self.simulate_latency().await;
        Ok(canned::startup().clone())
    }

    async fn get_member_list(
        &self,
        _params: &MemberListParams,
    ) -> Result<MemberListResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::member_list().clone())
    }

    async fn get_individual_member(
        &self,
        _params: &IndividualMemberParams,
    ) -> Result<IndividualMemberInfo, ApiError> {
        self.simulate_latency().await;
        Ok(canned::individual_member().clone())
    }

    async fn get_patrols(&self, _params: &PatrolsParams) -> Result<PatrolsResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::patrols().clone())
    }

    async fn get_census_details(&self, _params: &CensusParams) -> Result<CensusResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::census().clone())
    }

    async fn get_flexi_records(
        &self,
        _params: &FlexiRecordsParams,
    ) -> Result<FlexiRecordsResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::flexi_records().clone())
    }

    async fn get_member_transfers(
        &self,
        _params: &MemberTransfersParams,
    ) -> Result<MemberTransfersResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::member_transfers().clone())
    }

    async fn get_deletable_members(
        &self,
        _section_id: &str,
    ) -> Result<DeletableMembersResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::deletable_members().clone())
    }

    async fn get_programme_summary(
        &self,
        _params: &ProgrammeSummaryParams,
    ) -> Result<ProgrammeSummaryResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::programme_summary().clone())
    }

    async fn get_badge_tag_cloud(
        &self,
        _params: &BadgeTagCloudParams,
    ) -> Result<BadgeTagCloud, ApiError> {
        self.simulate_latency().await;
        Ok(canned::badge_tag_cloud().clone())
    }

    async fn get_risk_assessment_categories(
        &self,
        _section_id: &str,
    ) -> Result<RiskAssessmentResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::risk_assessment().clone())
    }

    async fn get_programme_detail(
        &self,
        _params: &ProgrammeDetailParams,
    ) -> Result<ProgrammeDetailResponse, ApiError> {
        self.simulate_latency().await;
        Ok(canned::programme_detail().clone())
    }

    async fn get_programme_attachments(
        &self,
        _params: &ProgrammeAttachmentsParams,
    ) -> Result<Value, ApiError> {
        self.simulate_latency().await;
        Ok(canned::programme_attachments().clone())
    }
}
