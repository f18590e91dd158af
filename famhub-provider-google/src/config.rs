//! Configuration and token storage for the Google provider.
//!
//! Credentials and tokens are stored in:
//!   ~/.config/famhub/providers/google/credentials.json
//!   ~/.config/famhub/providers/google/tokens.json
//!
//! famhub is a single-user-per-machine app, so one token file is enough.

use crate::types::{GoogleCredentials, StoredTokens};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// How close to expiry a token may get before it is refreshed.
const REFRESH_MARGIN_SECS: i64 = 60;

fn base_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("famhub")
        .join("providers")
        .join("google"))
}

fn token_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("tokens.json"))
}

pub fn load_credentials() -> Result<GoogleCredentials> {
    let path = base_dir()?.join("credentials.json");

    if !path.exists() {
        anyhow::bail!(
            "Google credentials not found.\n\n\
            Create {} with:\n\n\
            {{\n  \
              \"client_id\": \"your-client-id.apps.googleusercontent.com\",\n  \
              \"client_secret\": \"your-client-secret\"\n\
            }}\n\n\
            See https://console.cloud.google.com/apis/credentials for setup.",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

    let creds: GoogleCredentials = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse credentials from {}", path.display()))?;

    Ok(creds)
}

pub fn load_tokens() -> Result<StoredTokens> {
    let path = token_path()?;

    if !path.exists() {
        anyhow::bail!("Not signed in to Google. Run `famhub login` first.");
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read tokens from {}", path.display()))?;

    let tokens: StoredTokens = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse tokens from {}", path.display()))?;

    Ok(tokens)
}

pub fn save_tokens(tokens: &StoredTokens) -> Result<()> {
    let path = token_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create tokens directory at {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(tokens).context("Failed to serialize tokens")?;

    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write tokens to {}", path.display()))?;

    Ok(())
}

/// Forget the signed-in account. A no-op when no tokens are stored.
pub fn clear_tokens() -> Result<()> {
    let path = token_path()?;

    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove tokens at {}", path.display()))?;
    }

    Ok(())
}

pub fn tokens_need_refresh(tokens: &StoredTokens) -> bool {
    match tokens.expires_at {
        Some(expires_at) => {
            expires_at - chrono::Utc::now() < chrono::Duration::seconds(REFRESH_MARGIN_SECS)
        }
        None => false,
    }
}
