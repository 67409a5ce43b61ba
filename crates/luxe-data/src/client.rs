//! The record-store collaborator trait.
//!
//! Records are JSON objects keyed by collection name, the shape the hosted
//! backend speaks. The typed helpers in [`DataClientExt`] go through serde
//! so callers work with domain structs instead of raw values.

use crate::error::DataError;
use crate::query::Select;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Async record store: insert/select/update/delete by collection name.
///
/// Calls are plain request/response with no timeout or cancellation; a
/// hung backend call simply leaves the caller suspended.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Insert one record, returning the stored record (with any
    /// backend-generated fields filled in).
    async fn insert(&self, collection: &str, record: Value) -> Result<Value, DataError>;

    /// Insert a batch of records.
    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> Result<(), DataError>;

    /// Select records matching a query.
    async fn select(&self, collection: &str, query: Select) -> Result<Vec<Value>, DataError>;

    /// Patch matching records with the fields of `patch`. Returns the
    /// number of records changed.
    async fn update(&self, collection: &str, query: Select, patch: Value)
        -> Result<u64, DataError>;

    /// Delete matching records. Returns the number removed.
    async fn delete(&self, collection: &str, query: Select) -> Result<u64, DataError>;

    /// Insert, or replace an existing record agreeing on every conflict
    /// field. Returns the stored record.
    async fn upsert(
        &self,
        collection: &str,
        record: Value,
        conflict_fields: &[&str],
    ) -> Result<Value, DataError>;
}

/// Typed convenience layer over [`DataClient`].
#[async_trait]
pub trait DataClientExt: DataClient {
    /// Insert a serializable value, returning the stored form.
    async fn insert_as<T>(&self, collection: &str, value: &T) -> Result<T, DataError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let stored = self.insert(collection, serde_json::to_value(value)?).await?;
        Ok(serde_json::from_value(stored)?)
    }

    /// Select and deserialize matching records.
    async fn select_as<T>(&self, collection: &str, query: Select) -> Result<Vec<T>, DataError>
    where
        T: DeserializeOwned + Send,
    {
        self.select(collection, query)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(DataError::from))
            .collect()
    }

    /// Select a single record, or None when nothing matches.
    async fn select_one_as<T>(
        &self,
        collection: &str,
        query: Select,
    ) -> Result<Option<T>, DataError>
    where
        T: DeserializeOwned + Send,
    {
        let mut records = self.select(collection, query.limit(1)).await?;
        match records.pop() {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }

    /// Upsert a serializable value keyed on the conflict fields.
    async fn upsert_as<T>(
        &self,
        collection: &str,
        value: &T,
        conflict_fields: &[&str],
    ) -> Result<T, DataError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let stored = self
            .upsert(collection, serde_json::to_value(value)?, conflict_fields)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }
}

impl<C: DataClient + ?Sized> DataClientExt for C {}
