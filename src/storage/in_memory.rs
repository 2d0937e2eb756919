//! In-memory storage implementation.
//!
//! Thread-safe implementation of [`StorageProvider`] backed by an ordered map behind an
//! async `RwLock`. Intended for tests, development, and single-process deployments that
//! do not need a replicated store.
//!
//! # Features
//!
//! * Thread-safe concurrent access with async RwLock
//! * Keys kept in lexicographic order, so prefix scans are range scans
//! * Last-write-wins PUT, matching the distributed backend
//!
//! # Performance Characteristics
//!
//! * PUT/GET/DELETE: O(log n)
//! * SCAN_PREFIX: O(log n + k) where k is the number of matching keys
//!
//! # Example Usage
//!
//! ```rust
//! use config_schema_registry::storage::{InMemoryStorage, StorageKey, StorageProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! storage.put(StorageKey::new("team-a", "service-x", "v1"), b"one".to_vec()).await?;
//! storage.put(StorageKey::new("team-a", "service-x", "v2"), b"two".to_vec()).await?;
//! storage.put(StorageKey::new("team-a", "service-y", "v1"), b"other".to_vec()).await?;
//!
//! let versions = storage.scan_prefix(StorageKey::prefix("team-a", "service-x")).await?;
//! assert_eq!(versions.len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::storage::{StorageError, StorageKey, StoragePrefix, StorageProvider};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory key-value storage.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    // Raw key string -> stored bytes
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage instance.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryStorageStats {
        let data_guard = self.data.read().await;

        let total_bytes = data_guard.values().map(Vec::len).sum();
        let mut schema_count = 0;
        let mut last_prefix: Option<StoragePrefix> = None;
        for raw in data_guard.keys() {
            if let Ok(key) = StorageKey::parse(raw) {
                let prefix = key.to_prefix();
                if last_prefix.as_ref() != Some(&prefix) {
                    schema_count += 1;
                    last_prefix = Some(prefix);
                }
            }
        }

        InMemoryStorageStats {
            total_entries: data_guard.len(),
            schema_count,
            total_bytes,
        }
    }

    /// Clear all data (useful for testing).
    pub async fn clear(&self) {
        let mut data_guard = self.data.write().await;
        data_guard.clear();
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageProvider for InMemoryStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, value: Vec<u8>) -> Result<(), Self::Error> {
        let mut data_guard = self.data.write().await;
        data_guard.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard.get(&key.to_string()).cloned())
    }

    async fn delete(&self, key: StorageKey) -> Result<u64, Self::Error> {
        let mut data_guard = self.data.write().await;
        let removed = data_guard.remove(&key.to_string()).is_some();
        Ok(u64::from(removed))
    }

    async fn scan_prefix(
        &self,
        prefix: StoragePrefix,
    ) -> Result<Vec<(StorageKey, Vec<u8>)>, Self::Error> {
        let data_guard = self.data.read().await;
        let start = prefix.scan_prefix();

        let mut results = Vec::new();
        for (raw, value) in data_guard.range::<String, _>((Bound::Included(&start), Bound::Unbounded))
        {
            if !raw.starts_with(&start) {
                break;
            }
            let key = StorageKey::parse(raw)
                .map_err(|e| StorageError::data_corruption(raw.clone(), e.to_string()))?;
            results.push((key, value.clone()));
        }

        Ok(results)
    }
}

/// Statistics about the current state of in-memory storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStorageStats {
    /// Number of stored keys (schema versions)
    pub total_entries: usize,
    /// Number of distinct namespace/name pairs
    pub schema_count: usize,
    /// Sum of stored value sizes
    pub total_bytes: usize,
}
