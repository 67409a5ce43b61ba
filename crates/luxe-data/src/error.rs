//! Data collaborator error types.

use thiserror::Error;

/// Errors from the external data/auth/file collaborator.
#[derive(Error, Debug)]
pub enum DataError {
    /// The backend rejected or failed the call (network, validation).
    #[error("Backend error: {0}")]
    Backend(String),

    /// No record or file matched.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule was violated (e.g., uploading to an existing
    /// path without upsert).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Record (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Serialization(e.to_string())
    }
}
