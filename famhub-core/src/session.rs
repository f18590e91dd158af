//! Signed-in session storage.
//!
//! The CLI keeps the currently signed-in family member in
//! ~/.config/famhub/session.toml. The provider keeps its own OAuth tokens;
//! this file only records who passed the allow-list gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::FamhubConfig;
use crate::error::{FamhubError, FamhubResult};

/// An authenticated family member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub display_name: Option<String>,
}

impl User {
    /// Preferred display form: the name when known, otherwise the e-mail.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// The session persisted between CLI invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Session {
            user,
            signed_in_at: Utc::now(),
        }
    }

    fn path() -> FamhubResult<PathBuf> {
        Ok(FamhubConfig::config_dir()?.join("session.toml"))
    }

    /// Load the stored session, or fail with `NotSignedIn`.
    pub fn load() -> FamhubResult<Session> {
        let path = Self::path()?;

        if !path.exists() {
            return Err(FamhubError::NotSignedIn);
        }

        let contents = std::fs::read_to_string(&path)?;

        toml::from_str(&contents).map_err(|e| FamhubError::Serialization(e.to_string()))
    }

    pub fn save(&self) -> FamhubResult<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| FamhubError::Serialization(e.to_string()))?;

        std::fs::write(&path, contents)?;

        Ok(())
    }

    /// Remove the stored session. A no-op when nobody is signed in.
    pub fn clear() -> FamhubResult<()> {
        let path = Self::path()?;

        if path.exists() {
            std::fs::remove_file(&path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_falls_back_to_email() {
        let named = User {
            email: "anna@example.com".to_string(),
            display_name: Some("Anna".to_string()),
        };
        let unnamed = User {
            email: "erik@example.com".to_string(),
            display_name: None,
        };

        assert_eq!(named.name(), "Anna");
        assert_eq!(unnamed.name(), "erik@example.com");
    }

    #[test]
    fn session_roundtrips_through_toml() {
        let session = Session::new(User {
            email: "anna@example.com".to_string(),
            display_name: Some("Anna".to_string()),
        });

        let toml = toml::to_string_pretty(&session).unwrap();
        let back: Session = toml::from_str(&toml).unwrap();

        assert_eq!(back.user.email, session.user.email);
        assert_eq!(back.signed_in_at, session.signed_in_at);
    }
}
