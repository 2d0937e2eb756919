//! etcd v3 storage backend.
//!
//! Stores each schema version under its flat key in an etcd cluster. etcd provides the
//! linearizable single-key reads and writes the registry assumes, and its sorted key space
//! turns version listing into a ranged `GET` with a prefix option.
//!
//! Every call acquires its own connection through [`EtcdConnection`] and releases it when
//! the guard drops, on success and error paths alike. Nothing is pooled between calls.
//!
//! Available behind the `etcd` feature.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use config_schema_registry::config::StoreConfig;
//! use config_schema_registry::storage::{EtcdStorage, StorageKey, StorageProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = EtcdStorage::new(StoreConfig::default())?;
//! let value = storage.get(StorageKey::new("team-a", "service-x", "v1")).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::StoreConfig;
use crate::storage::{StorageError, StorageKey, StoragePrefix, StorageProvider};
use etcd_client::{Client, ConnectOptions, GetOptions, SortOrder, SortTarget};
use log::{debug, trace};
use std::ops::{Deref, DerefMut};

/// Key-value storage backed by an etcd cluster.
#[derive(Debug, Clone)]
pub struct EtcdStorage {
    config: StoreConfig,
}

impl EtcdStorage {
    /// Create a backend for the cluster described by `config`.
    ///
    /// No connection is made until the first call.
    pub fn new(config: StoreConfig) -> Result<Self, StorageError> {
        if config.endpoints.is_empty() {
            return Err(StorageError::configuration(
                "no etcd endpoints configured",
                "endpoints",
            ));
        }
        Ok(Self { config })
    }

    /// Endpoints this backend connects to.
    pub fn endpoints(&self) -> &[String] {
        &self.config.endpoints
    }

    async fn acquire(&self, operation: &'static str) -> Result<EtcdConnection, StorageError> {
        let options = ConnectOptions::new()
            .with_connect_timeout(self.config.dial_timeout)
            .with_timeout(self.config.timeout);

        let client = Client::connect(self.config.endpoints.as_slice(), Some(options))
            .await
            .map_err(|e| {
                StorageError::network_at(
                    format!("failed to connect for {}: {}", operation, e),
                    self.config.endpoints.join(","),
                )
            })?;

        trace!("etcd connection acquired for {}", operation);
        Ok(EtcdConnection { client, operation })
    }

    fn map_error(&self, operation: &str, error: etcd_client::Error) -> StorageError {
        match error {
            etcd_client::Error::TransportError(e) => StorageError::network_at(
                format!("{} failed: {}", operation, e),
                self.config.endpoints.join(","),
            ),
            etcd_client::Error::GRpcStatus(status) => {
                StorageError::unavailable(format!("{} failed: {}", operation, status.message()))
            }
            other => {
                StorageError::internal_with_source(format!("{} failed", operation), Box::new(other))
            }
        }
    }
}

/// A connection scoped to a single storage call.
///
/// The underlying channel closes when the guard is dropped.
pub struct EtcdConnection {
    client: Client,
    operation: &'static str,
}

impl Deref for EtcdConnection {
    type Target = Client;

    fn deref(&self) -> &Client {
        &self.client
    }
}

impl DerefMut for EtcdConnection {
    fn deref_mut(&mut self) -> &mut Client {
        &mut self.client
    }
}

impl Drop for EtcdConnection {
    fn drop(&mut self) {
        trace!("etcd connection released after {}", self.operation);
    }
}

impl StorageProvider for EtcdStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, value: Vec<u8>) -> Result<(), Self::Error> {
        let mut conn = self.acquire("put").await?;
        conn.put(key.to_string(), value, None)
            .await
            .map_err(|e| self.map_error("put", e))?;
        debug!("etcd PUT {}", key);
        Ok(())
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut conn = self.acquire("get").await?;
        let response = conn
            .get(key.to_string(), None)
            .await
            .map_err(|e| self.map_error("get", e))?;
        Ok(response.kvs().first().map(|kv| kv.value().to_vec()))
    }

    async fn delete(&self, key: StorageKey) -> Result<u64, Self::Error> {
        let mut conn = self.acquire("delete").await?;
        let response = conn
            .delete(key.to_string(), None)
            .await
            .map_err(|e| self.map_error("delete", e))?;
        Ok(u64::try_from(response.deleted()).unwrap_or(0))
    }

    async fn scan_prefix(
        &self,
        prefix: StoragePrefix,
    ) -> Result<Vec<(StorageKey, Vec<u8>)>, Self::Error> {
        let mut conn = self.acquire("scan_prefix").await?;
        let options = GetOptions::new()
            .with_prefix()
            .with_sort(SortTarget::Key, SortOrder::Ascend);
        let response = conn
            .get(prefix.scan_prefix(), Some(options))
            .await
            .map_err(|e| self.map_error("scan_prefix", e))?;

        let mut results = Vec::with_capacity(response.kvs().len());
        for kv in response.kvs() {
            let raw = kv
                .key_str()
                .map_err(|e| StorageError::data_corruption(prefix.scan_prefix(), e.to_string()))?;
            let key = StorageKey::parse(raw)
                .map_err(|e| StorageError::data_corruption(raw, e.to_string()))?;
            results.push((key, kv.value().to_vec()));
        }

        debug!("etcd scan {} returned {} keys", prefix, results.len());
        Ok(results)
    }
}
