//! Capability seams over the provider subprocess.
//!
//! Three narrow interfaces keep the CLI decoupled from any concrete vendor
//! SDK: identity, calendar CRUD, and photo storage. Each has an
//! implementation that forwards to the configured provider binary through
//! the JSON protocol.

use serde_json::json;

use crate::config::FamhubConfig;
use crate::constants::MAX_EVENTS;
use crate::date_range::DateRange;
use crate::error::FamhubResult;
use crate::event::{Event, EventDraft, EventPatch};
use crate::photo::{Photo, PhotoUpload};
use crate::protocol::Command;
use crate::provider::Provider;
use crate::session::User;

/// Sign-in and sign-out against the identity provider.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn sign_in(&self) -> FamhubResult<User>;
    async fn sign_out(&self) -> FamhubResult<()>;
}

/// CRUD against the shared family calendar.
#[allow(async_fn_in_trait)]
pub trait CalendarClient {
    async fn list_events(&self, range: &DateRange) -> FamhubResult<Vec<Event>>;
    async fn create_event(&self, draft: &EventDraft) -> FamhubResult<Event>;
    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> FamhubResult<Event>;
    async fn delete_event(&self, event_id: &str) -> FamhubResult<()>;
}

/// The shared photo album: object storage plus its metadata collection.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn upload(&self, upload: &PhotoUpload) -> FamhubResult<Photo>;
    async fn list(&self) -> FamhubResult<Vec<Photo>>;
    async fn delete(&self, photo: &Photo) -> FamhubResult<()>;
}

/// Identity via the configured provider binary.
pub struct ProviderIdentity {
    provider: Provider,
}

impl ProviderIdentity {
    pub fn new(config: &FamhubConfig) -> Self {
        ProviderIdentity {
            provider: Provider::from_name(&config.provider),
        }
    }
}

impl IdentityProvider for ProviderIdentity {
    async fn sign_in(&self) -> FamhubResult<User> {
        // The OAuth consent flow waits on the user's browser: no timeout
        self.provider.call(Command::SignIn, json!({})).await
    }

    async fn sign_out(&self) -> FamhubResult<()> {
        self.provider
            .call_with_timeout(Command::SignOut, json!({}))
            .await
    }
}

/// Calendar CRUD on the shared family calendar via the provider binary.
pub struct ProviderCalendar {
    provider: Provider,
    calendar_id: String,
}

impl ProviderCalendar {
    pub fn new(config: &FamhubConfig) -> FamhubResult<Self> {
        Ok(ProviderCalendar {
            provider: Provider::from_name(&config.provider),
            calendar_id: config.calendar_id()?.to_string(),
        })
    }
}

impl CalendarClient for ProviderCalendar {
    async fn list_events(&self, range: &DateRange) -> FamhubResult<Vec<Event>> {
        self.provider
            .call_with_timeout(
                Command::ListEvents,
                json!({
                    "calendar_id": &self.calendar_id,
                    "time_min": range.from_rfc3339(),
                    "time_max": range.to_rfc3339(),
                    "max_results": MAX_EVENTS,
                }),
            )
            .await
    }

    async fn create_event(&self, draft: &EventDraft) -> FamhubResult<Event> {
        self.provider
            .call_with_timeout(
                Command::CreateEvent,
                json!({
                    "calendar_id": &self.calendar_id,
                    "event": draft,
                }),
            )
            .await
    }

    async fn update_event(&self, event_id: &str, patch: &EventPatch) -> FamhubResult<Event> {
        self.provider
            .call_with_timeout(
                Command::UpdateEvent,
                json!({
                    "calendar_id": &self.calendar_id,
                    "event_id": event_id,
                    "patch": patch,
                }),
            )
            .await
    }

    async fn delete_event(&self, event_id: &str) -> FamhubResult<()> {
        self.provider
            .call_with_timeout(
                Command::DeleteEvent,
                json!({
                    "calendar_id": &self.calendar_id,
                    "event_id": event_id,
                }),
            )
            .await
    }
}

/// The photo album via the provider binary.
pub struct ProviderPhotos {
    provider: Provider,
    bucket: String,
    project: String,
}

impl ProviderPhotos {
    pub fn new(config: &FamhubConfig) -> FamhubResult<Self> {
        Ok(ProviderPhotos {
            provider: Provider::from_name(&config.provider),
            bucket: config.storage_bucket()?.to_string(),
            project: config.firestore_project()?.to_string(),
        })
    }
}

impl ObjectStore for ProviderPhotos {
    async fn upload(&self, upload: &PhotoUpload) -> FamhubResult<Photo> {
        // Uploads scale with file size: no timeout
        self.provider
            .call(
                Command::UploadPhoto,
                json!({
                    "bucket": &self.bucket,
                    "project": &self.project,
                    "file_path": &upload.file_path,
                    "uploaded_by": &upload.uploaded_by,
                    "uploaded_by_name": &upload.uploaded_by_name,
                }),
            )
            .await
    }

    async fn list(&self) -> FamhubResult<Vec<Photo>> {
        self.provider
            .call_with_timeout(
                Command::ListPhotos,
                json!({
                    "project": &self.project,
                }),
            )
            .await
    }

    async fn delete(&self, photo: &Photo) -> FamhubResult<()> {
        self.provider
            .call_with_timeout(
                Command::DeletePhoto,
                json!({
                    "bucket": &self.bucket,
                    "project": &self.project,
                    "photo_id": &photo.id,
                    "storage_path": &photo.storage_path,
                }),
            )
            .await
    }
}
