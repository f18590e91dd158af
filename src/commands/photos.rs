use anyhow::Result;
use famhub_core::clients::{ObjectStore, ProviderPhotos};
use famhub_core::config::FamhubConfig;
use famhub_core::photo::PhotoUpload;
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub async fn list() -> Result<()> {
    crate::require_session()?;

    let config = FamhubConfig::load()?;
    let store = ProviderPhotos::new(&config)?;

    let photos = store.list().await?;

    if photos.is_empty() {
        println!("{}", "No photos in the album yet".dimmed());
        return Ok(());
    }

    for photo in &photos {
        let date = photo
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d");

        println!(
            "{}  {} {} {}",
            date,
            photo.file_name.bold(),
            format_size(photo.size).dimmed(),
            format!("by {}", photo.uploaded_by_name).dimmed()
        );
        println!("            {}", photo.id.dimmed());
    }

    Ok(())
}

pub async fn upload(path: PathBuf) -> Result<()> {
    let session = crate::require_session()?;

    if !path.is_file() {
        anyhow::bail!("No such file: {}", path.display());
    }

    let config = FamhubConfig::load()?;
    let store = ProviderPhotos::new(&config)?;

    println!("Uploading {}...", path.display());

    let upload = PhotoUpload {
        file_path: path,
        uploaded_by: session.user.email.clone(),
        uploaded_by_name: session.user.name().to_string(),
    };

    let photo = store.upload(&upload).await?;

    println!("Uploaded \"{}\" {}", photo.file_name, photo.id.dimmed());

    Ok(())
}

pub async fn rm(photo_id: String) -> Result<()> {
    crate::require_session()?;

    let config = FamhubConfig::load()?;
    let store = ProviderPhotos::new(&config)?;

    let photos = store.list().await?;
    let photo = photos
        .iter()
        .find(|p| p.id == photo_id)
        .ok_or_else(|| anyhow::anyhow!("No photo with id {}", photo_id))?;

    store.delete(photo).await?;

    println!("Removed \"{}\"", photo.file_name);

    Ok(())
}

/// Human-readable object size (e.g. "482 kB", "2.1 MB")
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1000;
    const MB: u64 = KB * 1000;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{} kB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_with_magnitude() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(482_133), "482 kB");
        assert_eq!(format_size(2_100_000), "2.1 MB");
    }
}
