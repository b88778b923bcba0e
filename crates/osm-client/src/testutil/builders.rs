//! Test data builders
//!
//! Provides builder patterns for creating test data with sensible defaults.

use chrono::{Duration, Utc};

use crate::osm::ProgrammeSummaryItem;

/// Builder for creating test ProgrammeSummaryItem objects
#[derive(Debug, Clone)]
pub struct ProgrammeItemBuilder {
    eveningid: String,
    sectionid: String,
    title: String,
    notesforparents: String,
    parentsrequired: bool,
    meetingdate: String,
    starttime: String,
    endtime: String,
    parentsattendingcount: u32,
}

impl Default for ProgrammeItemBuilder {
    fn default() -> Self {
        Self {
            eveningid: "evening_1".to_string(),
            sectionid: "1".to_string(),
            title: "Test Meeting".to_string(),
            notesforparents: String::new(),
            parentsrequired: false,
            meetingdate: "2025-01-15".to_string(),
            starttime: "19:00".to_string(),
            endtime: "20:30".to_string(),
            parentsattendingcount: 0,
        }
    }
}

impl ProgrammeItemBuilder {
    /// Creates a new programme item builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the evening ID
    pub fn evening(mut self, eveningid: impl Into<String>) -> Self {
        self.eveningid = eveningid.into();
        self
    }

    /// Sets the meeting title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the raw meeting date
    pub fn meeting_date(mut self, date: impl Into<String>) -> Self {
        self.meetingdate = date.into();
        self
    }

    /// Sets the meeting date to N days from today (negative for past)
    pub fn in_days(mut self, days: i64) -> Self {
        self.meetingdate = (Utc::now().date_naive() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string();
        self
    }

    /// Sets whether parents are required
    pub fn parents_required(mut self, required: bool) -> Self {
        self.parentsrequired = required;
        self
    }

    /// Sets the number of parents attending
    pub fn parents_attending(mut self, count: u32) -> Self {
        self.parentsattendingcount = count;
        self
    }

    /// Builds the ProgrammeSummaryItem
    pub fn build(self) -> ProgrammeSummaryItem {
        ProgrammeSummaryItem {
            eveningid: self.eveningid,
            sectionid: self.sectionid,
            title: self.title,
            notesforparents: self.notesforparents,
            parentsrequired: self.parentsrequired,
            meetingdate: self.meetingdate,
            starttime: self.starttime,
            endtime: self.endtime,
            parentsattendingcount: self.parentsattendingcount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programme_item_builder_defaults() {
        let item = ProgrammeItemBuilder::new().build();

        assert!(!item.eveningid.is_empty());
        assert!(item.meeting_date().is_some());
        assert!(!item.is_special());
    }

    #[test]
    fn programme_item_builder_relative_dates() {
        let today = Utc::now().date_naive();

        let past = ProgrammeItemBuilder::new().in_days(-3).build();
        let future = ProgrammeItemBuilder::new().in_days(3).build();

        assert!(past.meeting_date().unwrap() < today);
        assert!(future.meeting_date().unwrap() > today);
    }
}
