use anyhow::Result;
use famhub_core::clients::{CalendarClient, ProviderCalendar};
use famhub_core::config::FamhubConfig;

pub async fn run(event_id: String) -> Result<()> {
    crate::require_session()?;

    let config = FamhubConfig::load()?;
    let calendar = ProviderCalendar::new(&config)?;

    calendar.delete_event(&event_id).await?;

    println!("Removed event {}", event_id);

    Ok(())
}
