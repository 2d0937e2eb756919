//! Storage abstraction layer for schema records.
//!
//! This module separates key-value persistence from registry logic. The [`StorageProvider`]
//! trait is the contract the registry consumes from an external, strongly-consistent
//! key-value store: point reads and writes on string keys carrying opaque byte values, plus
//! a prefix scan used to enumerate versions.
//!
//! # Architecture
//!
//! The storage layer is responsible for:
//! - Pure PUT/GET/DELETE operations on opaque bytes
//! - Ordered prefix scans over the flat key space
//! - Connection handling for networked backends
//!
//! The storage layer is NOT responsible for:
//! - Record encoding (owner, timestamps, schema text)
//! - Deadlines on individual calls (applied by [`crate::store::SchemaStore`])
//! - Request validation or schema validation
//!
//! PUT is an unconditional overwrite. There is no compare-and-swap, so concurrent writers
//! to the same key race and the last write to land wins.
//!
//! # Example Usage
//!
//! ```rust
//! use config_schema_registry::storage::{InMemoryStorage, StorageKey, StorageProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let key = StorageKey::new("team-a", "service-x", "v1");
//! storage.put(key.clone(), b"{}".to_vec()).await?;
//!
//! let versions = storage.scan_prefix(StorageKey::prefix("team-a", "service-x")).await?;
//! assert_eq!(versions.len(), 1);
//!
//! let deleted = storage.delete(key).await?;
//! assert_eq!(deleted, 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

#[cfg(feature = "etcd")]
pub mod etcd;


pub use errors::StorageError;
pub use in_memory::{InMemoryStorage, InMemoryStorageStats};

#[cfg(feature = "etcd")]
pub use etcd::EtcdStorage;

use crate::triplet::{KeyError, SEPARATOR};
use std::fmt;
use std::future::Future;

/// A flat key identifying one schema version: `namespace/name/version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey {
    namespace: String,
    name: String,
    version: String,
}

impl StorageKey {
    /// Create a new storage key.
    ///
    /// Components are taken as-is; use [`crate::triplet::build_key`] to construct keys from
    /// untrusted input.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse a raw key read back from the store.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let mut parts = raw.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(name), Some(version), None)
                if !namespace.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(namespace, name, version))
            }
            _ => Err(KeyError::Malformed {
                key: raw.to_string(),
            }),
        }
    }

    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Create a prefix for listing every version of a schema.
    pub fn prefix(namespace: impl Into<String>, name: impl Into<String>) -> StoragePrefix {
        StoragePrefix {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The prefix this key falls under.
    pub fn to_prefix(&self) -> StoragePrefix {
        Self::prefix(&self.namespace, &self.name)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.namespace, SEPARATOR, self.name, SEPARATOR, self.version
        )
    }
}

/// A prefix shared by every version of one schema: `namespace/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePrefix {
    namespace: String,
    name: String,
}

impl StoragePrefix {
    /// Get the namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw string range scans are issued for.
    ///
    /// Includes the trailing separator so that `team-a/service-x` never matches keys under
    /// `team-a/service-xy`.
    pub fn scan_prefix(&self) -> String {
        format!("{}{}", self, SEPARATOR)
    }

    /// Check whether a key falls under this prefix.
    pub fn contains(&self, key: &StorageKey) -> bool {
        key.namespace == self.namespace && key.name == self.name
    }
}

impl fmt::Display for StoragePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, SEPARATOR, self.name)
    }
}

/// Contract for key-value backends holding serialized schema records.
///
/// Implementations must provide linearizable reads-after-writes on a single key for a
/// single caller. Nothing stronger is assumed across keys or callers.
///
/// # Design Principles
///
/// - **PUT is overwrite**: no separate create/update and no conflict detection
/// - **Absence is a value**: `get` returns `None` and `delete` returns `0` for missing keys
/// - **Empty scans are valid**: a prefix with no keys yields an empty vector
/// - **Opaque values**: backends never interpret the bytes they store
pub trait StorageProvider: Send + Sync {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `value` at `key`, replacing any previous value.
    fn put(
        &self,
        key: StorageKey,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Retrieve the value at `key`.
    ///
    /// # Returns
    /// `Some(bytes)` if the key exists, `None` if it doesn't.
    fn get(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send;

    /// Delete the value at `key`.
    ///
    /// # Returns
    /// The number of deleted entries: `1` if the key existed, `0` otherwise.
    fn delete(&self, key: StorageKey) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Return every entry under `prefix`, ordered by key.
    fn scan_prefix(
        &self,
        prefix: StoragePrefix,
    ) -> impl Future<Output = Result<Vec<(StorageKey, Vec<u8>)>, Self::Error>> + Send;
}
