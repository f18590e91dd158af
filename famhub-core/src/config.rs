//! Global famhub configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{FamhubError, FamhubResult};

fn default_provider() -> String {
    "google".to_string()
}

/// Global configuration at ~/.config/famhub/config.toml
///
/// Everything famhub needs to know about the family: who may sign in, which
/// calendar is shared, and where the photo album lives. Provider credentials
/// and tokens are stored by the provider binaries themselves.
#[derive(Serialize, Deserialize, Clone)]
pub struct FamhubConfig {
    /// E-mail addresses allowed to sign in. An empty list admits nobody.
    #[serde(default)]
    pub allowed_emails: Vec<String>,

    /// ID of the shared family calendar.
    #[serde(default)]
    pub calendar_id: String,

    /// Cloud Storage bucket holding the photo album.
    #[serde(default)]
    pub storage_bucket: String,

    /// Project that owns the photo metadata database.
    #[serde(default)]
    pub firestore_project: String,

    /// Provider binary serving identity, calendar and storage requests.
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl FamhubConfig {
    pub fn config_dir() -> FamhubResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FamhubError::Config("Could not determine config directory".into()))?
            .join("famhub");

        Ok(config_dir)
    }

    pub fn config_path() -> FamhubResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> FamhubResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: FamhubConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| FamhubError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FamhubError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Whether `email` belongs to a family member.
    ///
    /// Comparison is case-insensitive, matching how mail providers treat
    /// addresses.
    pub fn is_allowed(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.allowed_emails.iter().any(|a| a.to_lowercase() == email)
    }

    pub fn calendar_id(&self) -> FamhubResult<&str> {
        require_field(&self.calendar_id, "calendar_id")
    }

    pub fn storage_bucket(&self) -> FamhubResult<&str> {
        require_field(&self.storage_bucket, "storage_bucket")
    }

    pub fn firestore_project(&self) -> FamhubResult<&str> {
        require_field(&self.firestore_project, "firestore_project")
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> FamhubResult<()> {
        let contents = "\
# famhub configuration

# E-mail addresses allowed to sign in (family members only):
# allowed_emails = [\"anna@example.com\", \"erik@example.com\"]

# ID of the shared family calendar:
# calendar_id = \"abc123@group.calendar.google.com\"

# Cloud Storage bucket for the photo album:
# storage_bucket = \"my-family.firebasestorage.app\"

# Project that owns the photo metadata database:
# firestore_project = \"my-family\"

# Provider binary used for service access:
# provider = \"google\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FamhubError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| FamhubError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn require_field<'a>(value: &'a str, name: &str) -> FamhubResult<&'a str> {
    if value.is_empty() {
        return Err(FamhubError::Config(format!(
            "{name} is not set. Add it to {}",
            FamhubConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the famhub config".to_string())
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_emails(emails: &[&str]) -> FamhubConfig {
        FamhubConfig {
            allowed_emails: emails.iter().map(|s| s.to_string()).collect(),
            calendar_id: String::new(),
            storage_bucket: String::new(),
            firestore_project: String::new(),
            provider: default_provider(),
        }
    }

    #[test]
    fn allow_list_is_case_insensitive() {
        let config = config_with_emails(&["Anna@Example.com"]);
        assert!(config.is_allowed("anna@example.com"));
        assert!(config.is_allowed("ANNA@EXAMPLE.COM"));
    }

    #[test]
    fn unknown_email_is_rejected() {
        let config = config_with_emails(&["anna@example.com"]);
        assert!(!config.is_allowed("mallory@example.com"));
    }

    #[test]
    fn empty_allow_list_admits_nobody() {
        let config = config_with_emails(&[]);
        assert!(!config.is_allowed("anna@example.com"));
        assert!(!config.is_allowed(""));
    }

    #[test]
    fn missing_service_ids_are_reported() {
        let config = config_with_emails(&[]);
        assert!(config.calendar_id().is_err());
        assert!(config.storage_bucket().is_err());
        assert!(config.firestore_project().is_err());
    }
}
