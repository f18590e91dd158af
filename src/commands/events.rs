use anyhow::Result;
use chrono::NaiveDate;
use famhub_core::clients::{CalendarClient, ProviderCalendar};
use famhub_core::config::FamhubConfig;
use famhub_core::date_range::DateRange;
use famhub_core::event::EventTime;
use famhub_core::holidays;
use owo_colors::OwoColorize;

pub async fn run(range: DateRange) -> Result<()> {
    crate::require_session()?;

    let config = FamhubConfig::load()?;
    let calendar = ProviderCalendar::new(&config)?;

    let mut events = calendar.list_events(&range).await?;
    events.sort_by_key(|e| e.start.to_utc());

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        let date = local_date(&event.start);

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            let date_label = format_date_label(date);
            match holidays::holiday_on(date) {
                Some(holiday) => println!("{} {}", date_label.bold(), holiday.name.red()),
                None => println!("{}", date_label.bold()),
            }
            current_date = Some(date);
        }

        let time = format_time(&event.start);
        println!("  {} {} {}", time, event.title, event.id.dimmed());
    }

    Ok(())
}

/// The event's calendar date in the viewer's timezone.
fn local_date(time: &EventTime) -> NaiveDate {
    match time {
        EventTime::Date(d) => *d,
        EventTime::DateTime(dt) => dt.with_timezone(&chrono::Local).date_naive(),
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Format the time portion of an event (e.g. "15:00" or "all-day")
fn format_time(time: &EventTime) -> String {
    match time {
        EventTime::Date(_) => "all-day".to_string(),
        EventTime::DateTime(dt) => {
            format!("{:>7}", dt.with_timezone(&chrono::Local).format("%H:%M"))
        }
    }
}
