//! Session identity helpers.

use crate::error::StoreError;
use luxe_commerce::ids::UserId;
use luxe_data::IdentityClient;

/// The signed-in user, if any.
pub async fn current_user(identity: &dyn IdentityClient) -> Result<Option<UserId>, StoreError> {
    Ok(identity.current_user().await?.map(|u| UserId::new(u.id)))
}

/// The signed-in user, or [`StoreError::NotAuthenticated`] for actions
/// that require an account (placing orders, reviewing).
pub async fn require_user(identity: &dyn IdentityClient) -> Result<UserId, StoreError> {
    current_user(identity)
        .await?
        .ok_or(StoreError::NotAuthenticated)
}
