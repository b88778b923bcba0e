//! Canned report data for the offline client
//!
//! Built once per process; programme dates are relative to the UTC date at
//! first use so the site always has upcoming meetings to show.

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::types::*;

fn upcoming_date(days_from_now: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days_from_now))
        .format("%Y-%m-%d")
        .to_string()
}

fn term(termid: &str, name: &str, startdate: &str, enddate: &str) -> Term {
    Term {
        termid: termid.to_string(),
        sectionid: "1".to_string(),
        name: name.to_string(),
        startdate: startdate.to_string(),
        enddate: enddate.to_string(),
        past: false,
    }
}

fn member(scoutid: &str, firstname: &str, lastname: &str, patrol: (&str, &str), age: u32) -> Member {
    Member {
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        photo_guid: format!("photo{}", scoutid.get(2..).unwrap_or(scoutid)),
        patrolid: patrol.0.to_string(),
        patrol: patrol.1.to_string(),
        sectionid: "1".to_string(),
        enddate: String::new(),
        age,
        active: true,
        scoutid: scoutid.to_string(),
        full_name: format!("{firstname} {lastname}"),
    }
}

fn patrol_member(scoutid: &str, firstname: &str, lastname: &str, patrolid: &str) -> PatrolMember {
    PatrolMember {
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        scout_id: scoutid.to_string(),
        patrolid: patrolid.to_string(),
        active: true,
        scoutid: scoutid.to_string(),
    }
}

fn patrol(patrolid: &str, name: &str, points: i64, members: Vec<PatrolMember>) -> Patrol {
    Patrol {
        patrolid: patrolid.to_string(),
        sectionid: "1".to_string(),
        name: name.to_string(),
        active: true,
        points,
        census_costs: json!({}),
        members,
    }
}

fn meeting(
    eveningid: &str,
    title: &str,
    notes: &str,
    days_from_now: i64,
    times: (&str, &str),
    parentsrequired: bool,
    parentsattendingcount: u32,
) -> ProgrammeSummaryItem {
    ProgrammeSummaryItem {
        eveningid: eveningid.to_string(),
        sectionid: "1".to_string(),
        title: title.to_string(),
        notesforparents: notes.to_string(),
        parentsrequired,
        meetingdate: upcoming_date(days_from_now),
        starttime: times.0.to_string(),
        endtime: times.1.to_string(),
        parentsattendingcount,
    }
}

static STARTUP: LazyLock<StartupData> = LazyLock::new(|| StartupData {
    globals: Globals {
        email: "leader@walkhamvalleyscouts.org.uk".to_string(),
        firstname: "John".to_string(),
        lastname: "Smith".to_string(),
        member_access: json!({}),
        notepads: json!({}),
        section_config: json!({}),
        terms: vec![
            term("1", "Autumn 2024", "2024-09-01", "2024-12-20"),
            term("2", "Spring 2025", "2025-01-06", "2025-04-04"),
            term("3", "Summer 2025", "2025-04-21", "2025-07-18"),
        ],
    },
});

static MEMBER_LIST: LazyLock<MemberListResponse> = LazyLock::new(|| MemberListResponse {
    identifier: "members".to_string(),
    photos: json!({}),
    items: vec![
        member("101", "Alice", "Johnson", ("1", "Red Patrol"), 10),
        member("102", "Bob", "Williams", ("1", "Red Patrol"), 11),
        member("103", "Charlie", "Brown", ("2", "Blue Patrol"), 10),
    ],
});

static INDIVIDUAL_MEMBER: LazyLock<IndividualMemberInfo> = LazyLock::new(|| IndividualMemberInfo {
    ok: true,
    read_only: Vec::new(),
    data: IndividualMemberData {
        scoutid: "101".to_string(),
        firstname: "Alice".to_string(),
        lastname: "Johnson".to_string(),
        dob: "2014-05-15".to_string(),
        started: "2023-09-01".to_string(),
        patrolid: "1".to_string(),
        sectionid: "1".to_string(),
        active: true,
        age: 10,
        meetings: 28,
    },
    meta: json!({}),
});

static PATROLS: LazyLock<PatrolsResponse> = LazyLock::new(|| PatrolsResponse {
    patrols: vec![
        patrol(
            "1",
            "Red Patrol",
            150,
            vec![
                patrol_member("101", "Alice", "Johnson", "1"),
                patrol_member("102", "Bob", "Williams", "1"),
            ],
        ),
        patrol(
            "2",
            "Blue Patrol",
            135,
            vec![patrol_member("103", "Charlie", "Brown", "2")],
        ),
        patrol(
            "-2",
            "Leaders",
            0,
            vec![patrol_member("201", "John", "Smith", "-2")],
        ),
    ],
});

static CENSUS: LazyLock<CensusResponse> = LazyLock::new(|| CensusResponse {
    identifier: "census".to_string(),
    items: Vec::new(),
});

static FLEXI_RECORDS: LazyLock<FlexiRecordsResponse> = LazyLock::new(|| FlexiRecordsResponse {
    identifier: "flexirecords".to_string(),
    label: "Flexi Records".to_string(),
    items: Vec::new(),
});

static MEMBER_TRANSFERS: LazyLock<MemberTransfersResponse> =
    LazyLock::new(|| MemberTransfersResponse {
        status: true,
        error: None,
        data: Vec::new(),
        meta: json!({}),
    });

static DELETABLE_MEMBERS: LazyLock<DeletableMembersResponse> =
    LazyLock::new(|| DeletableMembersResponse {
        status: true,
        error: None,
        data: Vec::new(),
        meta: json!({}),
    });

static PROGRAMME_SUMMARY: LazyLock<ProgrammeSummaryResponse> =
    LazyLock::new(|| ProgrammeSummaryResponse {
        items: vec![
            meeting(
                "1",
                "Camping Skills",
                "Please bring warm clothing and outdoor gear",
                5,
                ("19:00", "20:30"),
                false,
                0,
            ),
            meeting(
                "2",
                "Fire Safety Badge",
                "We will be learning about fire safety and prevention",
                12,
                ("19:00", "20:30"),
                false,
                0,
            ),
            meeting(
                "3",
                "Navigation Skills",
                "Bring a compass if you have one",
                19,
                ("19:00", "20:30"),
                false,
                0,
            ),
            meeting(
                "4",
                "Weekend Camp",
                "Special event - full kit list will be sent via email. Parent helpers needed!",
                28,
                ("18:00", "16:00"),
                true,
                5,
            ),
            meeting(
                "5",
                "End of Term Party",
                "Celebration evening with games and activities. Please bring a small contribution for the party food.",
                42,
                ("19:00", "21:00"),
                true,
                12,
            ),
        ],
    });

static BADGE_TAG_CLOUD: LazyLock<BadgeTagCloud> = LazyLock::new(|| BadgeTagCloud {
    tags: BTreeMap::from([
        ("Camping".to_string(), 15),
        ("Fire Safety".to_string(), 12),
        ("Navigation".to_string(), 10),
        ("First Aid".to_string(), 8),
        ("Cooking".to_string(), 7),
    ]),
    tag_count: json!(5),
    badges: json!({
        "camp_permit": "Camping",
        "fire_safety": "Fire Safety",
        "navigator": "Navigation",
        "first_aid": "First Aid",
        "chef": "Cooking",
    }),
});

static RISK_ASSESSMENT: LazyLock<RiskAssessmentResponse> =
    LazyLock::new(|| RiskAssessmentResponse {
        status: true,
        error: None,
        data: ["Low Risk", "Medium Risk", "High Risk"]
            .into_iter()
            .map(|name| RiskAssessmentCategory {
                name: name.to_string(),
            })
            .collect(),
        meta: json!({}),
    });

static PROGRAMME_DETAIL: LazyLock<ProgrammeDetailResponse> =
    LazyLock::new(|| ProgrammeDetailResponse {
        items: vec![ProgrammeDetailItem {
            eveningid: "1".to_string(),
            sectionid: "1".to_string(),
            title: "Camping Skills".to_string(),
            meetingdate: PROGRAMME_SUMMARY.items[0].meetingdate.clone(),
            starttime: "19:00".to_string(),
            endtime: "20:30".to_string(),
            help: Vec::new(),
            unavailableleaders: Vec::new(),
        }],
        badgelinks: json!({
            "camp_permit": ["Tent pitching", "Camp safety", "Outdoor cooking basics"],
            "outdoors_challenge": ["Setting up camp", "Leave no trace principles"],
        }),
    });

static PROGRAMME_ATTACHMENTS: LazyLock<Value> = LazyLock::new(|| json!({}));

pub fn startup() -> &'static StartupData {
    &STARTUP
}

pub fn member_list() -> &'static MemberListResponse {
    &MEMBER_LIST
}

pub fn individual_member() -> &'static IndividualMemberInfo {
    &INDIVIDUAL_MEMBER
}

pub fn patrols() -> &'static PatrolsResponse {
    &PATROLS
}

pub fn census() -> &'static CensusResponse {
    &CENSUS
}

pub fn flexi_records() -> &'static FlexiRecordsResponse {
    &FLEXI_RECORDS
}

pub fn member_transfers() -> &'static MemberTransfersResponse {
    &MEMBER_TRANSFERS
}

pub fn deletable_members() -> &'static DeletableMembersResponse {
    &DELETABLE_MEMBERS
}

pub fn programme_summary() -> &'static ProgrammeSummaryResponse {
    &PROGRAMME_SUMMARY
}

pub fn badge_tag_cloud() -> &'static BadgeTagCloud {
    &BADGE_TAG_CLOUD
}

pub fn risk_assessment() -> &'static RiskAssessmentResponse {
    &RISK_ASSESSMENT
}

pub fn programme_detail() -> &'static ProgrammeDetailResponse {
    &PROGRAMME_DETAIL
}

pub fn programme_attachments() -> &'static Value {
    &PROGRAMME_ATTACHMENTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programme_dates_are_upcoming_and_ascending() {
        let today = Utc::now().date_naive();
        let dates: Vec<_> = programme_summary()
            .items
            .iter()
            .map(|i| i.meeting_date().unwrap())
            .collect();

        assert_eq!(dates.len(), 5);
        assert!(dates.iter().all(|d| *d > today));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn photo_guid_drops_id_prefix() {
        let patrol = ("1", "Eagles");

        assert_eq!(member("101", "A", "B", patrol, 11).photo_guid, "photo1");
        assert_eq!(member("7", "A", "B", patrol, 11).photo_guid, "photo7");
        assert_eq!(member("", "A", "B", patrol, 11).photo_guid, "photo");
    }

    #[test]
    fn detail_shares_first_meeting_date() {
        assert_eq!(
            programme_detail().items[0].meetingdate,
            programme_summary().items[0].meetingdate
        );
    }

    #[test]
    fn canned_values_are_stable() {
        assert!(std::ptr::eq(programme_summary(), programme_summary()));
        assert_eq!(badge_tag_cloud().tags.len(), 5);
    }

    #[test]
    fn canned_values_serialize_like_upstream() {
        let json = serde_json::to_value(startup()).unwrap();
        assert!(json["globals"]["sectionConfig"].is_object());

        let json = serde_json::to_value(member_transfers()).unwrap();
        assert!(json["error"].is_null());
    }
}
