//! In-memory storage implementation for testing and development.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::storage::SiteStorage;

/// In-memory site collection.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
#[derive(Default)]
pub struct MemoryStorage {
    records: RwLock<Vec<Value>>,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw records, e.g. legacy shapes that never went through a save.
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Default::default()
        }
    }

    /// Snapshot of the raw stored records.
    pub async fn records(&self) -> Vec<Value> {
        self.records.read().await.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent load and save fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_failing(&self) -> StorageResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "memory storage set to fail"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SiteStorage for MemoryStorage {
    async fn load(&self) -> StorageResult<Vec<Value>> {
        self.check_failing()?;
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[Value]) -> StorageResult<()> {
        self.check_failing()?;
        *self.records.write().await = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
