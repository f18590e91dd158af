//! Provider-neutral calendar event types.
//!
//! Providers convert their API responses into these types, and the CLI
//! works exclusively with them.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// An event on the shared family calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    /// Last modification timestamp, when the provider reports one.
    pub updated: Option<DateTime<Utc>>,
}

/// Start or end of an event: a whole day, or a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// The instant used for sorting; whole days count from midnight UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date(d) => d.and_time(NaiveTime::MIN).and_utc(),
            EventTime::DateTime(dt) => *dt,
        }
    }

    pub fn date_naive(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date_naive(),
        }
    }
}

/// Fields for a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Partial update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn all_day_events_sort_from_midnight() {
        let all_day = EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        let timed = EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap());

        assert!(all_day.is_all_day());
        assert!(all_day.to_utc() < timed.to_utc());
        assert_eq!(all_day.date_naive(), timed.date_naive());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(EventPatch::default().is_empty());

        let patch = EventPatch {
            title: Some("Middag hos mormor".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
