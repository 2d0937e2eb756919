//! Typed schema store on top of a key-value backend.
//!
//! [`SchemaStore`] owns the mapping from storage key to serialized [`StoredSchema`]. It
//! encodes and decodes records and applies a single bounded deadline to every backend
//! call. A missed deadline surfaces as [`StorageError::Timeout`], never as absence, and is
//! not retried.

use crate::config::StoreConfig;
use crate::record::{SchemaRecord, StoredSchema};
use crate::storage::{StorageError, StorageKey, StoragePrefix, StorageProvider};
use log::{debug, trace, warn};
use std::future::Future;
use std::time::Duration;

/// Schema persistence with per-call deadlines.
#[derive(Debug, Clone)]
pub struct SchemaStore<S> {
    storage: S,
    timeout: Duration,
}

impl<S> SchemaStore<S>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    /// Wrap a backend, taking the per-call deadline from `config`.
    pub fn new(storage: S, config: &StoreConfig) -> Self {
        Self::with_timeout(storage, config.timeout)
    }

    /// Wrap a backend with an explicit per-call deadline.
    pub fn with_timeout(storage: S, timeout: Duration) -> Self {
        Self { storage, timeout }
    }

    /// The deadline applied to each backend call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Access the underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write `record` at `key`, replacing whatever was there.
    pub async fn save(&self, key: &StorageKey, record: &StoredSchema) -> Result<(), StorageError> {
        let bytes = record
            .to_bytes()
            .map_err(|e| StorageError::serialization_of(e.to_string(), "StoredSchema"))?;
        trace!("Saving {} bytes at {}", bytes.len(), key);

        self.with_deadline("put", self.storage.put(key.clone(), bytes))
            .await
    }

    /// Point read. `None` means no record exists at `key`.
    pub async fn get(&self, key: &StorageKey) -> Result<Option<StoredSchema>, StorageError> {
        let bytes = self
            .with_deadline("get", self.storage.get(key.clone()))
            .await?;

        match bytes {
            Some(bytes) => {
                trace!("Read {} bytes at {}", bytes.len(), key);
                decode(key, &bytes).map(Some)
            }
            None => {
                debug!("No record at {}", key);
                Ok(None)
            }
        }
    }

    /// Delete the record at `key`, returning how many entries were removed.
    pub async fn delete(&self, key: &StorageKey) -> Result<u64, StorageError> {
        let deleted = self
            .with_deadline("delete", self.storage.delete(key.clone()))
            .await?;
        if deleted == 0 {
            debug!("Delete of {} removed nothing", key);
        }
        Ok(deleted)
    }

    /// Every record under `prefix`, ordered by key.
    pub async fn list_by_prefix(
        &self,
        prefix: &StoragePrefix,
    ) -> Result<Vec<SchemaRecord>, StorageError> {
        let entries = self
            .with_deadline("scan_prefix", self.storage.scan_prefix(prefix.clone()))
            .await?;

        entries
            .into_iter()
            .map(|(key, bytes)| decode(&key, &bytes).map(|s| SchemaRecord::from_stored(&key, s)))
            .collect()
    }

    async fn with_deadline<T, E, F>(
        &self,
        operation: &'static str,
        call: F,
    ) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<StorageError>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => {
                warn!(
                    "Store {} exceeded deadline of {:?}",
                    operation, self.timeout
                );
                Err(StorageError::timeout(operation, self.timeout))
            }
        }
    }
}

fn decode(key: &StorageKey, bytes: &[u8]) -> Result<StoredSchema, StorageError> {
    StoredSchema::from_bytes(bytes)
        .map_err(|e| StorageError::data_corruption(key.to_string(), e.to_string()))
}
