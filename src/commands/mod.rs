pub mod add;
pub mod edit;
pub mod events;
pub mod holidays;
pub mod login;
pub mod logout;
pub mod photos;
pub mod rm;
pub mod whoami;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use famhub_core::event::EventTime;

/// Parse "YYYY-MM-DD" as an all-day time and "YYYY-MM-DDTHH:MM" as local
/// wall-clock time.
pub fn parse_event_time(s: &str) -> Result<EventTime> {
    if s.contains('T') {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .with_context(|| format!("Invalid date/time '{}'. Expected YYYY-MM-DDTHH:MM", s))?;
        let local = Local
            .from_local_datetime(&naive)
            .single()
            .with_context(|| format!("Ambiguous local time '{}'", s))?;
        Ok(EventTime::DateTime(local.with_timezone(&Utc)))
    } else {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))?;
        Ok(EventTime::Date(date))
    }
}

/// Timed events default to one hour; all-day events to the next day
/// (the calendar treats all-day ends as exclusive).
pub fn default_end(start: &EventTime) -> EventTime {
    match start {
        EventTime::Date(d) => EventTime::Date(*d + Duration::days(1)),
        EventTime::DateTime(dt) => EventTime::DateTime(*dt + Duration::hours(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dates_become_all_day_times() {
        let time = parse_event_time("2025-06-20").unwrap();
        assert!(time.is_all_day());
    }

    #[test]
    fn datetimes_become_timed_events() {
        let time = parse_event_time("2025-06-20T15:00").unwrap();
        assert!(!time.is_all_day());
    }

    #[test]
    fn malformed_times_are_rejected() {
        assert!(parse_event_time("20 juni").is_err());
        assert!(parse_event_time("2025-06-20T25:00").is_err());
    }

    #[test]
    fn default_ends_follow_the_event_kind() {
        let all_day = parse_event_time("2025-06-20").unwrap();
        let timed = parse_event_time("2025-06-20T15:00").unwrap();

        assert_eq!(
            default_end(&all_day).date_naive(),
            NaiveDate::from_ymd_opt(2025, 6, 21).unwrap()
        );
        assert_eq!(
            default_end(&timed).to_utc() - timed.to_utc(),
            Duration::hours(1)
        );
    }
}
