//! Conversion between famhub events and Google Calendar resources.

use famhub_core::constants::EVENT_TIMEZONE;
use famhub_core::event::{Event, EventDraft, EventPatch, EventTime};

use crate::types::{GoogleEvent, GoogleEventTime};

/// Convert a Google event into the provider-neutral shape.
///
/// Returns `None` for events famhub cannot represent (missing id or
/// missing start/end), which the listing simply skips.
pub fn from_google_event(event: GoogleEvent) -> Option<Event> {
    if event.id.is_empty() {
        return None;
    }

    let start = from_google_time(event.start?)?;
    let end = from_google_time(event.end?)?;

    Some(Event {
        id: event.id,
        title: if event.summary.is_empty() {
            "(No title)".to_string()
        } else {
            event.summary
        },
        description: if event.description.is_empty() {
            None
        } else {
            Some(event.description)
        },
        start,
        end,
        updated: event.updated,
    })
}

fn from_google_time(time: GoogleEventTime) -> Option<EventTime> {
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt))
    } else {
        time.date.map(EventTime::Date)
    }
}

/// Timed events carry the family timezone, all-day events a plain date.
fn to_google_time(time: &EventTime) -> GoogleEventTime {
    match time {
        EventTime::Date(d) => GoogleEventTime {
            date: Some(*d),
            ..Default::default()
        },
        EventTime::DateTime(dt) => GoogleEventTime {
            date_time: Some(*dt),
            time_zone: Some(EVENT_TIMEZONE.to_string()),
            ..Default::default()
        },
    }
}

pub fn draft_to_google(draft: &EventDraft) -> GoogleEvent {
    GoogleEvent {
        summary: draft.title.clone(),
        description: draft.description.clone().unwrap_or_default(),
        start: Some(to_google_time(&draft.start)),
        end: Some(to_google_time(&draft.end)),
        ..Default::default()
    }
}

/// Only the fields present in the patch are serialized, so Google's patch
/// semantics leave everything else untouched.
pub fn patch_to_google(patch: &EventPatch) -> GoogleEvent {
    GoogleEvent {
        summary: patch.title.clone().unwrap_or_default(),
        description: patch.description.clone().unwrap_or_default(),
        start: patch.start.as_ref().map(to_google_time),
        end: patch.end.as_ref().map(to_google_time),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn all_day(y: i32, m: u32, d: u32) -> EventTime {
        EventTime::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn all_day_drafts_use_plain_dates() {
        let draft = EventDraft {
            title: "Midsommarfirande".to_string(),
            description: None,
            start: all_day(2025, 6, 20),
            end: all_day(2025, 6, 21),
        };

        let google = draft_to_google(&draft);
        let json = serde_json::to_value(&google).unwrap();

        assert_eq!(json["start"]["date"], "2025-06-20");
        assert!(json["start"].get("dateTime").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn timed_drafts_carry_the_family_timezone() {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 14, 0, 0).unwrap();
        let draft = EventDraft {
            title: "Tandläkare".to_string(),
            description: Some("Folktandvården".to_string()),
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(start + chrono::Duration::hours(1)),
        };

        let json = serde_json::to_value(draft_to_google(&draft)).unwrap();

        assert_eq!(json["start"]["timeZone"], EVENT_TIMEZONE);
        assert!(json["start"].get("date").is_none());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = EventPatch {
            title: Some("Nytt namn".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(patch_to_google(&patch)).unwrap();

        assert_eq!(json["summary"], "Nytt namn");
        assert!(json.get("description").is_none());
        assert!(json.get("start").is_none());
        assert!(json.get("end").is_none());
    }

    #[test]
    fn unrepresentable_google_events_are_skipped() {
        let no_id: GoogleEvent = serde_json::from_value(serde_json::json!({
            "summary": "spöke",
            "start": {"date": "2025-01-01"},
            "end": {"date": "2025-01-02"},
        }))
        .unwrap();
        assert!(from_google_event(no_id).is_none());

        let no_times: GoogleEvent = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "summary": "halvfärdig",
        }))
        .unwrap();
        assert!(from_google_event(no_times).is_none());
    }

    #[test]
    fn untitled_events_get_a_placeholder() {
        let event: GoogleEvent = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "start": {"date": "2025-01-01"},
            "end": {"date": "2025-01-02"},
        }))
        .unwrap();

        let converted = from_google_event(event).unwrap();
        assert_eq!(converted.title, "(No title)");
        assert!(converted.start.is_all_day());
    }
}
