//! User profiles and role checks.

use crate::collections;
use crate::error::StoreError;
use luxe_commerce::ids::UserId;
use luxe_data::{DataClient, DataClientExt, Select};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Role stored on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Customer,
}

/// A user profile record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Matches the auth collaborator's user id.
    pub id: UserId,
    /// Display name.
    pub full_name: Option<String>,
    /// Role for admin gating.
    pub role: UserRole,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

/// Access to user profiles.
#[derive(Clone)]
pub struct ProfileRepo {
    client: Arc<dyn DataClient>,
}

impl ProfileRepo {
    /// Create a repository over a data client.
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// Fetch a user's profile.
    pub async fn fetch(&self, user_id: &UserId) -> Result<UserProfile, StoreError> {
        self.client
            .select_one_as(
                collections::USER_PROFILES,
                Select::new().eq("id", user_id.as_str()),
            )
            .await?
            .ok_or_else(|| StoreError::not_found("profile", user_id.as_str()))
    }

    /// Whether the user may enter the admin area. A missing profile is
    /// not an error here, just not an admin.
    pub async fn is_admin(&self, user_id: &UserId) -> Result<bool, StoreError> {
        match self.fetch(user_id).await {
            Ok(profile) => Ok(profile.role == UserRole::Admin),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
