//! Common error types for HSK practice front ends.

use thiserror::Error;

use hsk_core::practice::PracticeError;
use hsk_core::srs::ConfigError;
use hsk_core::storage::StoreError;

/// Common error type for HSK practice operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Progress storage error
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Rejected practice action
    #[error("practice error: {0}")]
    Practice(#[from] PracticeError),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type alias using the HSK practice Error.
pub type Result<T> = std::result::Result<T, Error>;
