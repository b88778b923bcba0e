use std::borrow::Cow;

/// The closed set of OSM report endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Startup,
    MemberList,
    IndividualMember,
    Patrols,
    Census,
    FlexiRecords,
    MemberTransfers,
    DeletableMembers { section_id: String },
    ProgrammeSummary,
    BadgeTagCloud,
    RiskAssessmentCategories { section_id: String },
    ProgrammeDetail,
    ProgrammeAttachments,
}

impl Endpoint {
    /// Path relative to the service root, including any fixed `action` query
    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Self::Startup => "/ext/generic/startup/?action=getData".into(),
            Self::MemberList => "/ext/members/contact/?action=getListOfMembers".into(),
            Self::IndividualMember => "/ext/members/contact/?action=getIndividual".into(),
            Self::Patrols => "/ext/members/patrols/?action=getPatrolsWithPeople".into(),
            Self::Census => "/ext/members/census/?action=getDetails".into(),
            Self::FlexiRecords => "/ext/members/flexirecords/?action=getPatrolsWithPeople".into(),
            Self::MemberTransfers => "/ext/members/contact/?action=getMemberTransfers".into(),
            Self::DeletableMembers { section_id } => {
                format!("/v3/members/review/deletion/{section_id}").into()
            }
            Self::ProgrammeSummary => "/ext/programme/?action=getProgrammeSummary".into(),
            Self::BadgeTagCloud => "/ext/programme/clouds/?action=getBadgeTagCloud".into(),
            Self::RiskAssessmentCategories { section_id } => {
                format!("/v3/risk_assessments/{section_id}/categories").into()
            }
            Self::ProgrammeDetail => "/ext/programme/?action=getProgramme".into(),
            Self::ProgrammeAttachments => {
                "/ext/programme/?action=programmeAttachmentsManifest".into()
            }
        }
    }

    /// Only the startup report wraps its JSON in a script assignment
    pub fn has_script_preamble(&self) -> bool {
        matches!(self, Self::Startup)
    }
}
