//! Photo metadata documents in Firestore.
//!
//! The album keeps one document per photo in the `photos` collection, with
//! the same camelCase field names the family's web app wrote. Documents are
//! read and written through the Firestore REST API's typed-value JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use famhub_core::constants::PHOTOS_COLLECTION;
use famhub_core::photo::Photo;
use serde_json::{Value, json};

use crate::oauth::get_valid_tokens;

const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";

fn documents_url(project: &str) -> String {
    format!("{FIRESTORE_API}/projects/{project}/databases/(default)/documents")
}

fn photo_fields(photo: &Photo) -> Value {
    json!({
        "fileName": {"stringValue": &photo.file_name},
        "storagePath": {"stringValue": &photo.storage_path},
        "url": {"stringValue": &photo.url},
        "contentType": {"stringValue": &photo.content_type},
        "size": {"integerValue": photo.size.to_string()},
        "uploadedBy": {"stringValue": &photo.uploaded_by},
        "uploadedByName": {"stringValue": &photo.uploaded_by_name},
        "createdAt": {"timestampValue": photo.created_at.to_rfc3339()},
    })
}

fn string_field(fields: &Value, name: &str) -> Option<String> {
    fields[name]["stringValue"].as_str().map(str::to_string)
}

fn size_field(fields: &Value) -> u64 {
    // Firestore sends integerValue as a string
    fields["size"]["integerValue"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

fn timestamp_field(fields: &Value, name: &str) -> Option<DateTime<Utc>> {
    let raw = fields[name]["timestampValue"].as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a Firestore document into a Photo. Documents missing required
/// fields are skipped by the caller.
fn photo_from_document(document: &Value) -> Option<Photo> {
    let name = document["name"].as_str()?;
    let id = name.rsplit('/').next()?.to_string();
    let fields = &document["fields"];

    Some(Photo {
        id,
        file_name: string_field(fields, "fileName")?,
        storage_path: string_field(fields, "storagePath")?,
        url: string_field(fields, "url")?,
        content_type: string_field(fields, "contentType").unwrap_or_default(),
        size: size_field(fields),
        uploaded_by: string_field(fields, "uploadedBy").unwrap_or_default(),
        uploaded_by_name: string_field(fields, "uploadedByName").unwrap_or_default(),
        created_at: timestamp_field(fields, "createdAt")?,
    })
}

/// Store metadata for an uploaded photo. Returns the new document id.
pub async fn create_photo_document(project: &str, photo: &Photo) -> Result<String> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let url = format!("{}/{}", documents_url(project), PHOTOS_COLLECTION);

    let response = client
        .post(&url)
        .bearer_auth(&tokens.access_token)
        .json(&json!({"fields": photo_fields(photo)}))
        .send()
        .await
        .context("Failed to reach Firestore")?
        .error_for_status()
        .context("Failed to store photo metadata")?;

    let document: Value = response.json().await?;

    document["name"]
        .as_str()
        .and_then(|name| name.rsplit('/').next())
        .map(str::to_string)
        .context("Firestore returned a document without a name")
}

/// All photos, newest first.
pub async fn list_photo_documents(project: &str) -> Result<Vec<Photo>> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let url = format!("{}:runQuery", documents_url(project));

    let query = json!({
        "structuredQuery": {
            "from": [{"collectionId": PHOTOS_COLLECTION}],
            "orderBy": [{
                "field": {"fieldPath": "createdAt"},
                "direction": "DESCENDING",
            }],
        }
    });

    let response = client
        .post(&url)
        .bearer_auth(&tokens.access_token)
        .json(&query)
        .send()
        .await
        .context("Failed to reach Firestore")?
        .error_for_status()
        .context("Failed to list photos")?;

    let results: Vec<Value> = response.json().await?;

    Ok(results
        .iter()
        .filter_map(|r| photo_from_document(&r["document"]))
        .collect())
}

/// Remove a photo's metadata document.
pub async fn delete_photo_document(project: &str, photo_id: &str) -> Result<()> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let url = format!("{}/{}/{}", documents_url(project), PHOTOS_COLLECTION, photo_id);

    client
        .delete(&url)
        .bearer_auth(&tokens.access_token)
        .send()
        .await
        .context("Failed to reach Firestore")?
        .error_for_status()
        .with_context(|| format!("Failed to delete photo metadata: {}", photo_id))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_photo() -> Photo {
        Photo {
            id: String::new(),
            file_name: "midsommar.jpg".to_string(),
            storage_path: "family-photos/1718900000000_midsommar.jpg".to_string(),
            url: "https://storage.googleapis.com/download/…".to_string(),
            content_type: "image/jpeg".to_string(),
            size: 482133,
            uploaded_by: "anna@example.com".to_string(),
            uploaded_by_name: "Anna".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 20, 18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn photos_roundtrip_through_firestore_documents() {
        let photo = sample_photo();

        let document = json!({
            "name": "projects/p/databases/(default)/documents/photos/AbC123",
            "fields": photo_fields(&photo),
        });

        let parsed = photo_from_document(&document).unwrap();

        assert_eq!(parsed.id, "AbC123");
        assert_eq!(parsed.file_name, photo.file_name);
        assert_eq!(parsed.storage_path, photo.storage_path);
        assert_eq!(parsed.size, photo.size);
        assert_eq!(parsed.created_at, photo.created_at);
    }

    #[test]
    fn incomplete_documents_are_rejected() {
        let document = json!({
            "name": "projects/p/databases/(default)/documents/photos/AbC123",
            "fields": {"fileName": {"stringValue": "x.jpg"}},
        });

        assert!(photo_from_document(&document).is_none());
    }
}
