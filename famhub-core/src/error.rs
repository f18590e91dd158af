//! Error types for the famhub ecosystem.

use thiserror::Error;

/// Errors that can occur in famhub operations.
#[derive(Error, Debug)]
pub enum FamhubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not signed in. Run `famhub login` first")]
    NotSignedIn,

    #[error("{0} is not on the family allow-list")]
    NotAllowed(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Year {0} is outside the supported range 1583-4099")]
    YearOutOfRange(i32),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for famhub operations.
pub type FamhubResult<T> = Result<T, FamhubError>;
