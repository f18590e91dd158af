//! Google Calendar v3 event CRUD.

use anyhow::{Context, Result, anyhow};
use famhub_core::event::{Event, EventDraft, EventPatch};
use reqwest::StatusCode;
use url::Url;

use crate::convert::{draft_to_google, from_google_event, patch_to_google};
use crate::oauth::get_valid_tokens;
use crate::types::{EventsPage, GoogleEvent};

const CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

fn events_url(calendar_id: &str) -> Result<Url> {
    let mut url = Url::parse(CALENDAR_API)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Invalid calendar API base URL"))?
        .extend(["calendars", calendar_id, "events"]);
    Ok(url)
}

fn event_url(calendar_id: &str, event_id: &str) -> Result<Url> {
    let mut url = events_url(calendar_id)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Invalid calendar API base URL"))?
        .push(event_id);
    Ok(url)
}

/// Fetch upcoming events, expanded to single instances and ordered by
/// start time.
pub async fn list_events(
    calendar_id: &str,
    time_min: &str,
    time_max: &str,
    max_results: u32,
) -> Result<Vec<Event>> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let max_results = max_results.to_string();

    let response = client
        .get(events_url(calendar_id)?)
        .bearer_auth(&tokens.access_token)
        .query(&[
            ("singleEvents", "true"),
            ("orderBy", "startTime"),
            ("showDeleted", "false"),
            ("timeMin", time_min),
            ("timeMax", time_max),
            ("maxResults", max_results.as_str()),
        ])
        .send()
        .await
        .context("Failed to reach Google Calendar")?
        .error_for_status()
        .context("Failed to fetch events")?;

    let page: EventsPage = response.json().await?;

    Ok(page
        .items
        .into_iter()
        .filter(|e| e.status != "cancelled")
        .filter_map(from_google_event)
        .collect())
}

/// Create a new event on the family calendar.
pub async fn create_event(calendar_id: &str, draft: &EventDraft) -> Result<Event> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(events_url(calendar_id)?)
        .bearer_auth(&tokens.access_token)
        .json(&draft_to_google(draft))
        .send()
        .await
        .context("Failed to reach Google Calendar")?
        .error_for_status()
        .with_context(|| format!("Failed to create event: {}", draft.title))?;

    let created: GoogleEvent = response.json().await?;

    from_google_event(created).context("Google returned an incomplete event")
}

/// Apply a partial update to an event.
pub async fn update_event(calendar_id: &str, event_id: &str, patch: &EventPatch) -> Result<Event> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let response = client
        .patch(event_url(calendar_id, event_id)?)
        .bearer_auth(&tokens.access_token)
        .json(&patch_to_google(patch))
        .send()
        .await
        .context("Failed to reach Google Calendar")?
        .error_for_status()
        .with_context(|| format!("Failed to update event: {}", event_id))?;

    let updated: GoogleEvent = response.json().await?;

    from_google_event(updated).context("Google returned an incomplete event")
}

/// Delete an event. An already-deleted event counts as success.
pub async fn delete_event(calendar_id: &str, event_id: &str) -> Result<()> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let response = client
        .delete(event_url(calendar_id, event_id)?)
        .bearer_auth(&tokens.access_token)
        .send()
        .await
        .context("Failed to reach Google Calendar")?;

    match response.status() {
        StatusCode::GONE | StatusCode::NOT_FOUND => Ok(()),
        _ => {
            response
                .error_for_status()
                .with_context(|| format!("Failed to delete event: {}", event_id))?;
            Ok(())
        }
    }
}
