use anyhow::Result;
use famhub_core::clients::{CalendarClient, ProviderCalendar};
use famhub_core::config::FamhubConfig;
use famhub_core::event::EventDraft;
use owo_colors::OwoColorize;

use super::{default_end, parse_event_time};

pub async fn run(
    title: String,
    start: String,
    end: Option<String>,
    description: Option<String>,
) -> Result<()> {
    crate::require_session()?;

    let config = FamhubConfig::load()?;
    let calendar = ProviderCalendar::new(&config)?;

    let start = parse_event_time(&start)?;
    let end = match end {
        Some(s) => parse_event_time(&s)?,
        None => default_end(&start),
    };

    if start.is_all_day() != end.is_all_day() {
        anyhow::bail!("Start and end must both be dates, or both be date/times");
    }

    let draft = EventDraft {
        title,
        description,
        start,
        end,
    };

    let event = calendar.create_event(&draft).await?;

    println!("Created \"{}\" {}", event.title, event.id.dimmed());

    Ok(())
}
