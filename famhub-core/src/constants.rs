//! Shared constants.

/// Default event listing window in days, counted from today.
pub const DEFAULT_WINDOW_DAYS: i64 = 60;

/// Maximum number of events fetched per listing.
pub const MAX_EVENTS: u32 = 100;

/// Bucket folder that photo objects live under.
pub const PHOTOS_FOLDER: &str = "family-photos";

/// Firestore collection holding photo metadata documents.
pub const PHOTOS_COLLECTION: &str = "photos";

/// Timezone applied to timed calendar events.
pub const EVENT_TIMEZONE: &str = "Europe/Stockholm";
