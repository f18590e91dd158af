//! Swedish public-holiday calculation.
//!
//! Pure calendar arithmetic: no clock, no timezone, no I/O. Dates are
//! `chrono::NaiveDate`, so every operation works on calendar fields rather
//! than instants, and formatting a date can never shift it across midnight.
//!
//! Six of the sixteen holidays are movable feasts anchored on Easter Sunday
//! or on a Saturday-on-or-after rule, so the Easter computation has to be
//! exact: a one-day error there moves Good Friday, Easter Monday, Ascension
//! Day and Pentecost along with it.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::{FamhubError, FamhubResult};

/// Years for which the Gregorian Easter computation is defined.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1583..=4099;

/// One Swedish public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: &'static str,
}

impl Holiday {
    /// The date in zero-padded `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Easter Sunday for `year`, per the anonymous Gregorian (Gauss) algorithm.
///
/// Integer arithmetic only. Valid for 1583..=4099; outside that range the
/// computation is not defined and `YearOutOfRange` is returned.
pub fn easter_sunday(year: i32) -> FamhubResult<NaiveDate> {
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(FamhubError::YearOutOfRange(year));
    }

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    // The formula always lands in March or April within the supported range.
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or(FamhubError::YearOutOfRange(year))
}

/// Midsummer Day: the Saturday between June 20 and 26.
pub fn midsummer_day(year: i32) -> FamhubResult<NaiveDate> {
    Ok(saturday_on_or_after(date_in(year, 6, 20)?))
}

/// All Saints' Day: the Saturday between October 31 and November 6.
pub fn all_saints_day(year: i32) -> FamhubResult<NaiveDate> {
    Ok(saturday_on_or_after(date_in(year, 10, 31)?))
}

/// The Saturday on or after `anchor`.
///
/// An anchor that is already a Saturday advances zero days, not a week.
fn saturday_on_or_after(anchor: NaiveDate) -> NaiveDate {
    // 0 = Sunday .. 6 = Saturday
    let weekday = anchor.weekday().num_days_from_sunday() as i64;
    anchor + Duration::days((6 - weekday + 7) % 7)
}

fn date_in(year: i32, month: u32, day: u32) -> FamhubResult<NaiveDate> {
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(FamhubError::YearOutOfRange(year));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(FamhubError::YearOutOfRange(year))
}

/// All sixteen Swedish public holidays for `year`.
///
/// The order is fixed: fixed-date holidays interleaved with the movable
/// feasts in declaration order, not sorted by date.
pub fn swedish_holidays(year: i32) -> FamhubResult<Vec<Holiday>> {
    let easter = easter_sunday(year)?;
    let midsummer = midsummer_day(year)?;
    let all_saints = all_saints_day(year)?;

    Ok(vec![
        Holiday { date: date_in(year, 1, 1)?, name: "Nyårsdagen" },
        Holiday { date: date_in(year, 1, 6)?, name: "Trettondedag jul" },
        Holiday { date: easter - Duration::days(2), name: "Långfredagen" },
        Holiday { date: easter, name: "Påskdagen" },
        Holiday { date: easter + Duration::days(1), name: "Annandag påsk" },
        Holiday { date: date_in(year, 5, 1)?, name: "Första maj" },
        Holiday { date: easter + Duration::days(39), name: "Kristi himmelsfärdsdag" },
        Holiday { date: easter + Duration::days(49), name: "Pingstdagen" },
        Holiday { date: date_in(year, 6, 6)?, name: "Nationaldagen" },
        Holiday { date: midsummer - Duration::days(1), name: "Midsommarafton" },
        Holiday { date: midsummer, name: "Midsommardagen" },
        Holiday { date: all_saints, name: "Alla helgons dag" },
        Holiday { date: date_in(year, 12, 24)?, name: "Julafton" },
        Holiday { date: date_in(year, 12, 25)?, name: "Juldagen" },
        Holiday { date: date_in(year, 12, 26)?, name: "Annandag jul" },
        Holiday { date: date_in(year, 12, 31)?, name: "Nyårsafton" },
    ])
}

/// Look up the holiday falling on `date_str` (`YYYY-MM-DD`).
///
/// Holidays are computed for `year`; the year embedded in `date_str` is not
/// parsed out, so a mismatched pair simply returns `None`. Absence is not an
/// error.
pub fn holiday_for_date(date_str: &str, year: i32) -> FamhubResult<Option<Holiday>> {
    Ok(swedish_holidays(year)?
        .into_iter()
        .find(|h| h.date_string() == date_str))
}

/// The holiday falling on `date`, if any.
pub fn holiday_on(date: NaiveDate) -> Option<Holiday> {
    swedish_holidays(date.year())
        .ok()?
        .into_iter()
        .find(|h| h.date == date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_reference_years() {
        assert_eq!(easter_sunday(2024).unwrap(), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025).unwrap(), date(2025, 4, 20));
        assert_eq!(easter_sunday(2026).unwrap(), date(2026, 4, 5));
        assert_eq!(easter_sunday(2000).unwrap(), date(2000, 4, 23));
    }

    #[test]
    fn easter_extremes() {
        // Earliest and latest possible Easter Sundays in the Gregorian cycle
        assert_eq!(easter_sunday(1818).unwrap(), date(1818, 3, 22));
        assert_eq!(easter_sunday(2038).unwrap(), date(2038, 4, 25));
    }

    #[test]
    fn easter_stays_within_bounds() {
        // Easter Sunday falls between March 22 and April 25, always
        for year in (1583..=4099).step_by(7) {
            let easter = easter_sunday(year).unwrap();
            assert_eq!(easter.year(), year);
            assert!(
                easter >= date(year, 3, 22) && easter <= date(year, 4, 25),
                "easter {year}: {easter}"
            );
        }
    }

    #[test]
    fn year_out_of_range_is_an_error() {
        assert!(matches!(
            easter_sunday(1582),
            Err(FamhubError::YearOutOfRange(1582))
        ));
        assert!(matches!(
            easter_sunday(4100),
            Err(FamhubError::YearOutOfRange(4100))
        ));
        assert!(swedish_holidays(-44).is_err());
    }

    #[test]
    fn midsummer_day_2024() {
        // June 20 2024 is a Thursday, so Midsummer Day is the 22nd
        assert_eq!(midsummer_day(2024).unwrap(), date(2024, 6, 22));
    }

    #[test]
    fn midsummer_anchor_already_saturday() {
        // June 20 2026 is itself a Saturday: no advance, not a full week
        assert_eq!(midsummer_day(2026).unwrap(), date(2026, 6, 20));
    }

    #[test]
    fn all_saints_day_2024() {
        assert_eq!(all_saints_day(2024).unwrap(), date(2024, 11, 2));
    }

    #[test]
    fn all_saints_anchor_already_saturday() {
        // October 31 2026 is a Saturday
        assert_eq!(all_saints_day(2026).unwrap(), date(2026, 10, 31));
    }

    #[test]
    fn sixteen_distinct_well_formed_holidays() {
        for year in [1583, 1999, 2024, 2025, 2026, 4099] {
            let holidays = swedish_holidays(year).unwrap();
            assert_eq!(holidays.len(), 16, "year {year}");

            let dates: HashSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();
            assert_eq!(dates.len(), 16, "duplicate dates in {year}");

            for h in &holidays {
                assert!(!h.name.is_empty());
                assert_eq!(h.date.year(), year);

                let s = h.date_string();
                assert_eq!(s.len(), 10, "{s}");
                assert_eq!(NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap(), h.date);
            }
        }
    }

    #[test]
    fn declaration_order_is_fixed() {
        let names: Vec<&str> = swedish_holidays(2024)
            .unwrap()
            .iter()
            .map(|h| h.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Nyårsdagen",
                "Trettondedag jul",
                "Långfredagen",
                "Påskdagen",
                "Annandag påsk",
                "Första maj",
                "Kristi himmelsfärdsdag",
                "Pingstdagen",
                "Nationaldagen",
                "Midsommarafton",
                "Midsommardagen",
                "Alla helgons dag",
                "Julafton",
                "Juldagen",
                "Annandag jul",
                "Nyårsafton",
            ]
        );
    }

    #[test]
    fn movable_feasts_2024() {
        let holidays = swedish_holidays(2024).unwrap();
        let by_name = |name: &str| holidays.iter().find(|h| h.name == name).unwrap().date;

        assert_eq!(by_name("Långfredagen"), date(2024, 3, 29));
        assert_eq!(by_name("Annandag påsk"), date(2024, 4, 1));
        assert_eq!(by_name("Kristi himmelsfärdsdag"), date(2024, 5, 9));
        assert_eq!(by_name("Pingstdagen"), date(2024, 5, 19));
        assert_eq!(by_name("Midsommarafton"), date(2024, 6, 21));
        assert_eq!(by_name("Alla helgons dag"), date(2024, 11, 2));
    }

    #[test]
    fn good_friday_never_leaves_the_year() {
        for year in (1583..=4099).step_by(13) {
            let easter = easter_sunday(year).unwrap();
            let good_friday = easter - Duration::days(2);
            assert_eq!(good_friday.year(), year);
            assert_eq!(easter - good_friday, Duration::days(2));
        }
    }

    #[test]
    fn lookup_by_date_string() {
        let christmas = holiday_for_date("2024-12-25", 2024).unwrap();
        assert_eq!(christmas.unwrap().name, "Juldagen");

        let nothing = holiday_for_date("2024-07-04", 2024).unwrap();
        assert!(nothing.is_none());
    }

    #[test]
    fn lookup_trusts_the_year_argument() {
        // The embedded year is not parsed out: holidays are computed for
        // the year argument, so a mismatched pair is simply absent.
        let mismatched = holiday_for_date("2023-12-25", 2024).unwrap();
        assert!(mismatched.is_none());

        let garbage = holiday_for_date("not-a-date", 2024).unwrap();
        assert!(garbage.is_none());
    }

    #[test]
    fn lookup_by_naive_date() {
        let h = holiday_on(date(2026, 6, 20)).unwrap();
        assert_eq!(h.name, "Midsommardagen");

        assert!(holiday_on(date(2026, 6, 15)).is_none());
    }

    #[test]
    fn computation_is_pure() {
        let first = swedish_holidays(2025).unwrap();
        let second = swedish_holidays(2025).unwrap();
        assert_eq!(first, second);
    }
}
