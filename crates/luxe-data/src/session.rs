//! Session-based identity from the auth collaborator.

use crate::error::DataError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The identity the auth collaborator reports for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable user identifier.
    pub id: String,
    /// Email address, when the provider exposes it.
    pub email: Option<String>,
}

impl SessionUser {
    /// Create a session user.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Async identity lookup for the current session.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// The signed-in user, or None for an anonymous session.
    async fn current_user(&self) -> Result<Option<SessionUser>, DataError>;
}
