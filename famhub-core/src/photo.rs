//! Photo album types.
//!
//! A photo is an object in the family's storage bucket plus a metadata
//! document describing it. Providers produce `Photo` values from the
//! metadata collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata for one photo in the shared album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Metadata document id.
    pub id: String,
    /// Original file name as uploaded.
    pub file_name: String,
    /// Object path inside the storage bucket.
    pub storage_path: String,
    /// Download URL for the object.
    pub url: String,
    pub content_type: String,
    /// Object size in bytes.
    pub size: u64,
    /// Id of the uploading user (their e-mail).
    pub uploaded_by: String,
    pub uploaded_by_name: String,
    pub created_at: DateTime<Utc>,
}

/// A local file queued for upload, with uploader attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub file_path: PathBuf,
    pub uploaded_by: String,
    pub uploaded_by_name: String,
}
