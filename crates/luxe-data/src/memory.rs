//! In-memory backend.
//!
//! Implements all three collaborator traits in-process: collections of
//! JSON rows, a byte store for uploads, and a settable session user.
//! Backs the test suites and local development.

use crate::client::DataClient;
use crate::error::DataError;
use crate::files::{FileClient, UploadOptions};
use crate::query::Select;
use crate::session::{IdentityClient, SessionUser};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// In-process record/file/identity backend.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    files: RwLock<HashMap<String, Vec<u8>>>,
    session: RwLock<Option<SessionUser>>,
    id_counter: AtomicU64,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current session user.
    pub async fn sign_in(&self, user: SessionUser) {
        *self.session.write().await = Some(user);
    }

    /// Clear the current session user.
    pub async fn sign_out(&self) {
        *self.session.write().await = None;
    }

    /// Read back a stored file, if present.
    pub async fn file(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(&file_key(bucket, path)).cloned()
    }

    fn next_id(&self, collection: &str) -> String {
        let n = self.id_counter.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}", collection, n)
    }

    /// Fill backend-generated fields on a new record.
    fn prepare(&self, collection: &str, mut record: Value) -> Result<Value, DataError> {
        let object = record
            .as_object_mut()
            .ok_or_else(|| DataError::Backend("record must be a JSON object".to_string()))?;
        if !object.contains_key("id") {
            object.insert("id".to_string(), Value::from(self.next_id(collection)));
        }
        if !object.contains_key("created_at") {
            object.insert("created_at".to_string(), Value::from(current_timestamp()));
        }
        Ok(record)
    }
}

#[async_trait]
impl DataClient for MemoryBackend {
    async fn insert(&self, collection: &str, record: Value) -> Result<Value, DataError> {
        let record = self.prepare(collection, record)?;
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        debug!(collection, "inserted record");
        Ok(record)
    }

    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> Result<(), DataError> {
        let prepared: Vec<Value> = records
            .into_iter()
            .map(|r| self.prepare(collection, r))
            .collect::<Result<_, _>>()?;
        let mut collections = self.collections.write().await;
        let count = prepared.len();
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(prepared);
        debug!(collection, count, "inserted records");
        Ok(())
    }

    async fn select(&self, collection: &str, query: Select) -> Result<Vec<Value>, DataError> {
        let collections = self.collections.read().await;
        let rows = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        Ok(query.apply(rows))
    }

    async fn update(
        &self,
        collection: &str,
        query: Select,
        patch: Value,
    ) -> Result<u64, DataError> {
        let patch = patch
            .as_object()
            .ok_or_else(|| DataError::Backend("patch must be a JSON object".to_string()))?
            .clone();
        let mut collections = self.collections.write().await;
        let Some(rows) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let mut changed = 0;
        for row in rows.iter_mut() {
            if query.matches(row) {
                if let Some(object) = row.as_object_mut() {
                    for (key, value) in &patch {
                        object.insert(key.clone(), value.clone());
                    }
                    changed += 1;
                }
            }
        }
        debug!(collection, changed, "updated records");
        Ok(changed)
    }

    async fn delete(&self, collection: &str, query: Select) -> Result<u64, DataError> {
        let mut collections = self.collections.write().await;
        let Some(rows) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !query.matches(row));
        Ok((before - rows.len()) as u64)
    }

    async fn upsert(
        &self,
        collection: &str,
        record: Value,
        conflict_fields: &[&str],
    ) -> Result<Value, DataError> {
        let incoming = record
            .as_object()
            .ok_or_else(|| DataError::Backend("record must be a JSON object".to_string()))?
            .clone();

        let mut collections = self.collections.write().await;
        let rows = collections.entry(collection.to_string()).or_default();

        let conflicts = |row: &Value| {
            conflict_fields.iter().all(|field| {
                match (row.get(*field), incoming.get(*field)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            })
        };

        if let Some(row) = rows.iter_mut().find(|r| conflicts(r)) {
            if let Some(object) = row.as_object_mut() {
                // Keep the original id and created_at unless the caller
                // explicitly overrides them.
                for (key, value) in incoming {
                    if key == "id" || key == "created_at" {
                        continue;
                    }
                    object.insert(key, value);
                }
            }
            debug!(collection, "upsert replaced record");
            return Ok(row.clone());
        }

        drop(collections);
        self.insert(collection, record).await
    }
}

#[async_trait]
impl FileClient for MemoryBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        options: UploadOptions,
    ) -> Result<String, DataError> {
        let key = file_key(bucket, path);
        let mut files = self.files.write().await;
        if !options.upsert && files.contains_key(&key) {
            return Err(DataError::Conflict(key));
        }
        files.insert(key, bytes);
        debug!(bucket, path, "stored file");
        Ok(path.to_string())
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<String, DataError> {
        let key = file_key(bucket, path);
        if !self.files.read().await.contains_key(&key) {
            return Err(DataError::NotFound(key));
        }
        let expires = current_timestamp() as u64 + expires_in_secs;
        Ok(format!("memory://{}/{}?expires={}", bucket, path, expires))
    }
}

#[async_trait]
impl IdentityClient for MemoryBackend {
    async fn current_user(&self) -> Result<Option<SessionUser>, DataError> {
        Ok(self.session.read().await.clone())
    }
}

fn file_key(bucket: &str, path: &str) -> String {
    format!("{}/{}", bucket, path)
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
