use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // Some reports append a time component; only the date matters here
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Section age group, as OSM names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Squirrels,
    Beavers,
    Cubs,
    Scouts,
    Explorers,
}

impl SectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Squirrels => "squirrels",
            Self::Beavers => "beavers",
            Self::Cubs => "cubs",
            Self::Scouts => "scouts",
            Self::Explorers => "explorers",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "squirrels" => Ok(Self::Squirrels),
            "beavers" => Ok(Self::Beavers),
            "cubs" => Ok(Self::Cubs),
            "scouts" => Ok(Self::Scouts),
            "explorers" => Ok(Self::Explorers),
            other => Err(format!("unknown section type: {other}")),
        }
    }
}

/// Member list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    Dob,
    Firstname,
    Lastname,
    Patrol,
}

impl SortOption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dob => "dob",
            Self::Firstname => "firstname",
            Self::Lastname => "lastname",
            Self::Patrol => "patrol",
        }
    }
}

/// OSM's `y`/`n` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "y")]
    Yes,
    #[serde(rename = "n")]
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "y",
            Self::No => "n",
        }
    }
}

// === Startup ===

/// Startup report: the signed-in user's profile and the terms they can see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupData {
    pub globals: Globals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub member_access: Value,
    #[serde(default)]
    pub notepads: Value,
    #[serde(default, rename = "sectionConfig")]
    pub section_config: Value,
    #[serde(default)]
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub termid: String,
    pub sectionid: String,
    pub name: String,
    pub startdate: String,
    pub enddate: String,
    pub past: bool,
}

impl Term {
    /// Returns true if `today` falls within the term's dates
    pub fn is_current(&self, today: NaiveDate) -> bool {
        match (parse_date(&self.startdate), parse_date(&self.enddate)) {
            (Some(start), Some(end)) => start <= today && today <= end,
            _ => false,
        }
    }
}

// === Members ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub firstname: String,
    pub lastname: String,
    pub photo_guid: String,
    pub patrolid: String,
    pub patrol: String,
    pub sectionid: String,
    pub enddate: String,
    pub age: u32,
    pub active: bool,
    pub scoutid: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    pub identifier: String,
    #[serde(default)]
    pub photos: Value,
    pub items: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualMemberData {
    pub scoutid: String,
    pub firstname: String,
    pub lastname: String,
    pub dob: String,
    pub started: String,
    pub patrolid: String,
    pub sectionid: String,
    pub active: bool,
    pub age: u32,
    pub meetings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualMemberInfo {
    pub ok: bool,
    #[serde(default)]
    pub read_only: Vec<String>,
    pub data: IndividualMemberData,
    #[serde(default)]
    pub meta: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolMember {
    pub firstname: String,
    pub lastname: String,
    pub scout_id: String,
    pub patrolid: String,
    pub active: bool,
    pub scoutid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub patrolid: String,
    pub sectionid: String,
    pub name: String,
    pub active: bool,
    pub points: i64,
    #[serde(default)]
    pub census_costs: Value,
    #[serde(default)]
    pub members: Vec<PatrolMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolsResponse {
    pub patrols: Vec<Patrol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusMember {
    pub scoutid: String,
    pub firstname: String,
    pub lastname: String,
    pub joined: String,
    pub sex: String,
    pub ethnicity: String,
    pub disabilities: String,
    pub myscout: bool,
    #[serde(default)]
    pub raw_disabilities: Value,
}

/// Members lacking census data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusResponse {
    pub identifier: String,
    pub items: Vec<CensusMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexiRecord {
    pub extraid: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexiRecordsResponse {
    pub identifier: String,
    pub label: String,
    pub items: Vec<FlexiRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTransfer {
    pub direction: String,
    pub member_id: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(rename = "type")]
    pub transfer_type: String,
    pub date: String,
    pub section_id: String,
    pub section_name: String,
    pub mode: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTransfersResponse {
    pub status: bool,
    pub error: Option<String>,
    pub data: Vec<MemberTransfer>,
    #[serde(default)]
    pub meta: Value,
}

/// Former member eligible for removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletableMember {
    pub firstname: String,
    pub lastname: String,
    pub date_deleted: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletableMembersResponse {
    pub status: bool,
    pub error: Option<String>,
    pub data: Vec<DeletableMember>,
    #[serde(default)]
    pub meta: Value,
}

// === Programme ===

/// One meeting in a term's programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeSummaryItem {
    pub eveningid: String,
    pub sectionid: String,
    pub title: String,
    #[serde(default)]
    pub notesforparents: String,
    pub parentsrequired: bool,
    pub meetingdate: String,
    pub starttime: String,
    pub endtime: String,
    #[serde(default)]
    pub parentsattendingcount: u32,
}

impl ProgrammeSummaryItem {
    /// Parses `meetingdate`, which OSM sends as `YYYY-MM-DD`
    pub fn meeting_date(&self) -> Option<NaiveDate> {
        parse_date(&self.meetingdate)
    }

    /// Special meetings need or already have parents attending
    pub fn is_special(&self) -> bool {
        self.parentsrequired || self.parentsattendingcount > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeSummaryResponse {
    pub items: Vec<ProgrammeSummaryItem>,
}

impl ProgrammeSummaryResponse {
    /// Items in ascending meeting date order; undated items go last
    pub fn sorted_by_date(&self) -> Vec<ProgrammeSummaryItem> {
        let mut items = self.items.clone();
        items.sort_by_key(|item| {
            let date = item.meeting_date();
            (date.is_none(), date)
        });
        items
    }

    /// Looks up one meeting by its evening id
    pub fn find_evening(&self, eveningid: &str) -> Option<&ProgrammeSummaryItem> {
        self.items.iter().find(|item| item.eveningid == eveningid)
    }
}

/// Badge coverage across a term's programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeTagCloud {
    /// Badge label to number of programme links
    pub tags: BTreeMap<String, u32>,
    #[serde(default)]
    pub tag_count: Value,
    #[serde(default)]
    pub badges: Value,
}

impl BadgeTagCloud {
    /// Badge labels with their counts, most covered first
    pub fn coverage(&self) -> Vec<(&str, u32)> {
        let mut coverage: Vec<(&str, u32)> = self
            .tags
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
            .collect();
        coverage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        coverage
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentResponse {
    pub status: bool,
    pub error: Option<String>,
    pub data: Vec<RiskAssessmentCategory>,
    #[serde(default)]
    pub meta: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeDetailItem {
    pub eveningid: String,
    pub sectionid: String,
    pub title: String,
    pub meetingdate: String,
    pub starttime: String,
    pub endtime: String,
    #[serde(default)]
    pub help: Vec<Value>,
    #[serde(default)]
    pub unavailableleaders: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgrammeDetailResponse {
    pub items: Vec<ProgrammeDetailItem>,
    #[serde(default)]
    pub badgelinks: Value,
}

// === Request parameters ===

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberListParams {
    pub sectionid: String,
    pub termid: String,
    pub sort: Option<SortOption>,
    pub section: Option<SectionType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndividualMemberParams {
    pub sectionid: String,
    pub scoutid: String,
    pub termid: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatrolsParams {
    pub sectionid: String,
    pub termid: String,
    pub include_no_patrol: Option<YesNo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CensusParams {
    pub sectionid: String,
    pub termid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexiRecordsParams {
    pub sectionid: String,
    pub archived: Option<YesNo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberTransfersParams {
    pub mode: String,
    pub section_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgrammeSummaryParams {
    pub sectionid: String,
    pub termid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeTagCloudParams {
    pub sectionid: String,
    pub termid: String,
    pub section: SectionType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgrammeDetailParams {
    pub sectionid: String,
    pub termid: String,
    pub eveningid: String,
}

/// Attachment manifest lookup; `path` defaults to `/` and `temp` to false
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgrammeAttachmentsParams {
    pub section_id: String,
    pub id: String,
    pub evening_id: String,
    pub path: Option<String>,
    pub temp: Option<bool>,
}
