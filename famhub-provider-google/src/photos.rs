//! Photo objects in Cloud Storage, plus upload/delete orchestration.
//!
//! An upload writes the object under `family-photos/` with a millisecond
//! timestamp prefix (so equal file names never collide), then records its
//! metadata in Firestore. Deletion removes both.

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use famhub_core::constants::PHOTOS_FOLDER;
use famhub_core::photo::Photo;
use reqwest::StatusCode;
use url::Url;

use crate::firestore;
use crate::oauth::get_valid_tokens;
use crate::types::ObjectResource;

const STORAGE_UPLOAD_API: &str = "https://storage.googleapis.com/upload/storage/v1/b";
const STORAGE_API: &str = "https://storage.googleapis.com/storage/v1/b";

/// Upload a local file to the album.
pub async fn upload_photo(
    bucket: &str,
    project: &str,
    file_path: &str,
    uploaded_by: &str,
    uploaded_by_name: &str,
) -> Result<Photo> {
    let path = std::path::Path::new(file_path);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", file_path))?
        .to_string();

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", file_path))?;

    let storage_path = format!(
        "{}/{}_{}",
        PHOTOS_FOLDER,
        Utc::now().timestamp_millis(),
        file_name
    );
    let content_type = content_type_for(&file_name);

    let resource = upload_object(bucket, &storage_path, content_type, bytes).await?;

    let photo = Photo {
        id: String::new(),
        file_name,
        storage_path,
        url: resource.media_link,
        content_type: content_type.to_string(),
        size: resource.size.parse().unwrap_or(0),
        uploaded_by: uploaded_by.to_string(),
        uploaded_by_name: uploaded_by_name.to_string(),
        created_at: Utc::now(),
    };

    let id = firestore::create_photo_document(project, &photo).await?;

    Ok(Photo { id, ..photo })
}

/// All photos in the album, newest first.
pub async fn list_photos(project: &str) -> Result<Vec<Photo>> {
    firestore::list_photo_documents(project).await
}

/// Remove a photo: the stored object first, then its metadata document.
pub async fn delete_photo(
    bucket: &str,
    project: &str,
    photo_id: &str,
    storage_path: &str,
) -> Result<()> {
    delete_object(bucket, storage_path).await?;
    firestore::delete_photo_document(project, photo_id).await
}

async fn upload_object(
    bucket: &str,
    object_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<ObjectResource> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    let url = format!("{}/{}/o", STORAGE_UPLOAD_API, bucket);

    let response = client
        .post(&url)
        .bearer_auth(&tokens.access_token)
        .query(&[("uploadType", "media"), ("name", object_name)])
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(bytes)
        .send()
        .await
        .context("Failed to reach Cloud Storage")?
        .error_for_status()
        .with_context(|| format!("Failed to upload {}", object_name))?;

    Ok(response.json().await?)
}

/// Delete an object. An already-missing object counts as success.
async fn delete_object(bucket: &str, object_name: &str) -> Result<()> {
    let tokens = get_valid_tokens().await?;
    let client = reqwest::Client::new();

    // The object name goes in the path with its slashes percent-encoded
    let mut url = Url::parse(STORAGE_API)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("Invalid storage API base URL"))?
        .extend([bucket, "o", object_name]);

    let response = client
        .delete(url)
        .bearer_auth(&tokens.access_token)
        .send()
        .await
        .context("Failed to reach Cloud Storage")?;

    match response.status() {
        StatusCode::NOT_FOUND => Ok(()),
        _ => {
            response
                .error_for_status()
                .with_context(|| format!("Failed to delete {}", object_name))?;
            Ok(())
        }
    }
}

/// Content type from the file extension. Unknown extensions fall back to
/// an opaque byte stream.
fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" | "heif" => "image/heic",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_follow_the_extension() {
        assert_eq!(content_type_for("midsommar.JPG"), "image/jpeg");
        assert_eq!(content_type_for("kalas.png"), "image/png");
        assert_eq!(content_type_for("semester.heic"), "image/heic");
        assert_eq!(content_type_for("klipp.mov"), "video/quicktime");
        assert_eq!(content_type_for("okänd.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("utan-ändelse"), "application/octet-stream");
    }
}
