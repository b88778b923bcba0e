use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::rate_limit::RateLimitInfo;
use super::types::*;

/// The OSM report surface
///
/// Implemented by the live [`OsmClient`](super::OsmClient) and by the
/// offline [`OfflineClient`](super::OfflineClient). Methods return the
/// upstream records as-is: no filtering, sorting or pagination.
#[async_trait]
pub trait OsmApi: Send + Sync {
    /// Limiter state from the most recent response, if any
    async fn rate_limit_info(&self) -> Option<RateLimitInfo>;

    /// Gets the user profile, section access and terms
    async fn get_startup_data(&self) -> Result<StartupData, ApiError>;

    /// Gets all members of a section for a term
    async fn get_member_list(
        &self,
        params: &MemberListParams,
    ) -> Result<MemberListResponse, ApiError>;

    async fn get_individual_member(
        &self,
        params: &IndividualMemberParams,
    ) -> Result<IndividualMemberInfo, ApiError>;

    /// Gets patrols (sixes, lodges) with their members
    async fn get_patrols(&self, params: &PatrolsParams) -> Result<PatrolsResponse, ApiError>;

    /// Gets members lacking census data
    async fn get_census_details(&self, params: &CensusParams) -> Result<CensusResponse, ApiError>;

    async fn get_flexi_records(
        &self,
        params: &FlexiRecordsParams,
    ) -> Result<FlexiRecordsResponse, ApiError>;

    /// Gets members pending transfer
    async fn get_member_transfers(
        &self,
        params: &MemberTransfersParams,
    ) -> Result<MemberTransfersResponse, ApiError>;

    /// Gets former members eligible for removal
    async fn get_deletable_members(
        &self,
        section_id: &str,
    ) -> Result<DeletableMembersResponse, ApiError>;

    /// Gets every meeting in a term
    async fn get_programme_summary(
        &self,
        params: &ProgrammeSummaryParams,
    ) -> Result<ProgrammeSummaryResponse, ApiError>;

    /// Gets badge coverage weights for a term's programme
    async fn get_badge_tag_cloud(
        &self,
        params: &BadgeTagCloudParams,
    ) -> Result<BadgeTagCloud, ApiError>;

    async fn get_risk_assessment_categories(
        &self,
        section_id: &str,
    ) -> Result<RiskAssessmentResponse, ApiError>;

    /// Gets full details of one meeting
    async fn get_programme_detail(
        &self,
        params: &ProgrammeDetailParams,
    ) -> Result<ProgrammeDetailResponse, ApiError>;

    /// Gets a meeting's attachment manifest, returned untyped
    async fn get_programme_attachments(
        &self,
        params: &ProgrammeAttachmentsParams,
    ) -> Result<Value, ApiError>;
}
