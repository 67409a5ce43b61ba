//! Storefront error types.

use luxe_commerce::CommerceError;
use luxe_data::DataError;
use thiserror::Error;

/// How the UI should surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blocks the action with an inline message; no state was mutated.
    Validation,
    /// Renders a fallback "not found" view.
    NotFound,
    /// Surfaced as a transient notification; the user may retry.
    External,
}

/// Errors from storefront flows.
///
/// Nothing here is fatal to the process; every failure is locally
/// recoverable by user retry.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Local validation failed before any mutation.
    #[error("{0}")]
    Validation(String),

    /// A looked-up entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The user must be signed in for this action.
    #[error("Not signed in")]
    NotAuthenticated,

    /// A domain rule was violated.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The external collaborator failed.
    #[error("External service error: {0}")]
    External(#[from] DataError),
}

impl StoreError {
    /// Create a not-found error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Classify for the UI.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation(_) | StoreError::Commerce(_) | StoreError::NotAuthenticated => {
                ErrorKind::Validation
            }
            StoreError::NotFound { .. } | StoreError::External(DataError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            StoreError::External(_) => ErrorKind::External,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            StoreError::Validation("pick a size".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            StoreError::not_found("product", "p1").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StoreError::External(DataError::Backend("boom".to_string())).kind(),
            ErrorKind::External
        );
        assert_eq!(
            StoreError::External(DataError::NotFound("row".to_string())).kind(),
            ErrorKind::NotFound
        );
    }
}
