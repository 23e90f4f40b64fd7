//! Storage trait for the site collection.
//!
//! A backend persists one ordered collection of site records and nothing
//! else. It knows nothing about slugs, aliases or schemas: `load` hands back
//! raw records exactly as stored (legacy shapes included) and `save`
//! replaces the whole collection at once.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageResult;

#[async_trait]
pub trait SiteStorage: Send + Sync {
    /// Read the full collection in stored order. A collection that was
    /// never written is empty.
    async fn load(&self) -> StorageResult<Vec<Value>>;

    /// Replace the full collection. Readers must never observe a partial write.
    async fn save(&self, records: &[Value]) -> StorageResult<()>;

    /// Human-readable location for logs and health output.
    fn describe(&self) -> String;
}

/// Shared handles forward to the backend, so a store can be built over
/// `Arc<dyn SiteStorage>` while the caller keeps its own handle.
#[async_trait]
impl<T: SiteStorage + ?Sized> SiteStorage for Arc<T> {
    async fn load(&self) -> StorageResult<Vec<Value>> {
        (**self).load().await
    }

    async fn save(&self, records: &[Value]) -> StorageResult<()> {
        (**self).save(records).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
