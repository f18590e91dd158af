//! Google wire types and stored credential shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// OAuth client credentials from the Google Cloud console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Tokens for the signed-in Google account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTokens {
    /// The account's e-mail address.
    pub account: String,
    pub display_name: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response from the OAuth token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// OpenID Connect userinfo payload (the fields famhub uses).
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Google Calendar event resource (the fields famhub uses).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleEvent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<GoogleEventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<GoogleEventTime>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Google's start/end shape: either `date` (all-day) or `dateTime`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleEventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// One page of an events listing.
#[derive(Debug, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
}

/// Cloud Storage object resource returned by an upload (the fields famhub
/// reads back).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectResource {
    #[serde(default)]
    pub media_link: String,
    /// Object size in bytes. The JSON API sends this as a string.
    #[serde(default)]
    pub size: String,
}
