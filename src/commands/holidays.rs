use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use famhub_core::holidays;
use owo_colors::OwoColorize;

pub fn run(year: Option<i32>, date: Option<String>) -> Result<()> {
    match date {
        Some(date_str) => check(&date_str, year),
        None => list(year.unwrap_or_else(|| chrono::Local::now().year())),
    }
}

fn check(date_str: &str, year: Option<i32>) -> Result<()> {
    // The lookup year defaults to the one embedded in the date string
    let parsed = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", date_str))?;
    let year = year.unwrap_or_else(|| parsed.year());

    match holidays::holiday_for_date(date_str, year)? {
        Some(holiday) => println!("{} is {}", holiday.date_string(), holiday.name.red()),
        None => println!("{} is not a public holiday", date_str),
    }

    Ok(())
}

fn list(year: i32) -> Result<()> {
    let mut holidays = holidays::swedish_holidays(year)?;
    holidays.sort_by_key(|h| h.date);

    println!("{}", format!("Swedish public holidays {}", year).bold());

    for holiday in &holidays {
        println!(
            "  {}  {}  {}",
            holiday.date_string(),
            holiday.date.format("%a"),
            holiday.name.red()
        );
    }

    Ok(())
}
