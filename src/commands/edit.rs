use anyhow::Result;
use famhub_core::clients::{CalendarClient, ProviderCalendar};
use famhub_core::config::FamhubConfig;
use famhub_core::event::EventPatch;
use owo_colors::OwoColorize;

use super::parse_event_time;

pub async fn run(
    event_id: String,
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
) -> Result<()> {
    crate::require_session()?;

    let config = FamhubConfig::load()?;
    let calendar = ProviderCalendar::new(&config)?;

    let patch = EventPatch {
        title,
        description,
        start: start.as_deref().map(parse_event_time).transpose()?,
        end: end.as_deref().map(parse_event_time).transpose()?,
    };

    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass --title, --start, --end or --description");
    }

    let event = calendar.update_event(&event_id, &patch).await?;

    println!("Updated \"{}\" {}", event.title, event.id.dimmed());

    Ok(())
}
