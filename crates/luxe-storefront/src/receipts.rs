//! Payment receipt storage.
//!
//! Receipts live in a private bucket under `{user}/{order}/{stamp}.{ext}`.
//! Every upload gets a fresh stamped path, so retrying a failed
//! submission with a new file never collides with an earlier upload.

use crate::config::StoreConfig;
use crate::error::StoreError;
use luxe_commerce::ids::{OrderId, UserId};
use luxe_data::{FileClient, UploadOptions};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Uploads receipts and signs URLs for viewing them.
#[derive(Clone)]
pub struct ReceiptStore {
    files: Arc<dyn FileClient>,
    bucket: String,
    url_ttl_secs: u64,
}

impl ReceiptStore {
    /// Create a store over a file client.
    pub fn new(files: Arc<dyn FileClient>, config: &StoreConfig) -> Self {
        Self {
            files,
            bucket: config.receipts_bucket.clone(),
            url_ttl_secs: config.receipt_url_ttl_secs,
        }
    }

    /// Upload a receipt, returning the storage path to persist on the
    /// payment record.
    pub async fn upload(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let ext = file_name.rsplit_once('.').map(|(_, e)| e).unwrap_or("jpg");
        let path = format!("{}/{}/{}.{}", user_id, order_id, unique_stamp(), ext);
        let options = UploadOptions {
            upsert: false,
            content_type: content_type_for(ext),
        };
        let stored = self.files.upload(&self.bucket, &path, bytes, options).await?;
        info!(order_id = %order_id, path = %stored, "receipt uploaded");
        Ok(stored)
    }

    /// A signed URL for viewing a stored receipt.
    pub async fn url(&self, path: &str) -> Result<String, StoreError> {
        Ok(self
            .files
            .signed_url(&self.bucket, path, self.url_ttl_secs)
            .await?)
    }
}

fn content_type_for(ext: &str) -> Option<String> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".to_string()),
        "png" => Some("image/png".to_string()),
        "webp" => Some("image/webp".to_string()),
        "pdf" => Some("application/pdf".to_string()),
        _ => None,
    }
}

/// Millisecond timestamp plus a process-wide counter, unique even for
/// uploads within the same millisecond.
fn unique_stamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", millis, n)
}
