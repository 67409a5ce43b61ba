//! The file-storage collaborator trait.

use crate::error::DataError;
use async_trait::async_trait;

/// Options for an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Overwrite an existing object at the same path. When false, an
    /// upload to an occupied path fails with [`DataError::Conflict`].
    pub upsert: bool,
    /// MIME type hint for the stored object.
    pub content_type: Option<String>,
}

/// Async file store: bucketed uploads and signed, time-limited URLs for
/// private objects.
#[async_trait]
pub trait FileClient: Send + Sync {
    /// Upload bytes to `bucket/path`, returning the storage path.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, DataError>;

    /// Create a signed URL for a stored object, valid for `expires_in_secs`.
    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<String, DataError>;
}
