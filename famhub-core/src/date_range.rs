//! Date range for filtering events.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::constants::DEFAULT_WINDOW_DAYS;
use crate::error::{FamhubError, FamhubResult};

/// Window of time used when listing calendar events.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Default for DateRange {
    /// Default range: from now until DEFAULT_WINDOW_DAYS ahead.
    fn default() -> Self {
        let now = Utc::now();
        DateRange {
            from: now,
            to: now + Duration::days(DEFAULT_WINDOW_DAYS),
        }
    }
}

impl DateRange {
    /// Parse CLI date arguments into a range.
    /// - `from`: YYYY-MM-DD, defaults to now
    /// - `to`: YYYY-MM-DD, defaults to DEFAULT_WINDOW_DAYS after `from`
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> FamhubResult<Self> {
        let from = match from {
            Some(s) => parse_date_start(s)?,
            None => Utc::now(),
        };

        let to = match to {
            Some(s) => parse_date_end(s)?,
            None => from + Duration::days(DEFAULT_WINDOW_DAYS),
        };

        Ok(DateRange { from, to })
    }

    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}

/// Parse YYYY-MM-DD as start of day in UTC
fn parse_date_start(s: &str) -> FamhubResult<DateTime<Utc>> {
    let date = parse_date(s)?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Parse YYYY-MM-DD as end of day in UTC
fn parse_date_end(s: &str) -> FamhubResult<DateTime<Utc>> {
    let date = parse_date(s)?;
    Ok(date.and_hms_opt(23, 59, 59).unwrap().and_utc())
}

fn parse_date(s: &str) -> FamhubResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| FamhubError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_bounds_cover_whole_days() {
        let range = DateRange::from_args(Some("2025-03-01"), Some("2025-03-31")).unwrap();

        assert_eq!(range.from_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert_eq!(range.to_rfc3339(), "2025-03-31T23:59:59+00:00");
    }

    #[test]
    fn default_window_follows_from() {
        let range = DateRange::from_args(Some("2025-03-01"), None).unwrap();

        assert_eq!(range.to - range.from, Duration::days(DEFAULT_WINDOW_DAYS));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(DateRange::from_args(Some("03/01/2025"), None).is_err());
        assert!(DateRange::from_args(None, Some("2025-13-01")).is_err());
    }
}
