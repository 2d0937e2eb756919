//! Shared fixtures and storage stubs for integration tests.

#![allow(dead_code)]

use config_schema_registry::config::RegistryConfig;
use config_schema_registry::operation_handler::{RegistryOperationHandler, SchemaDetails};
use config_schema_registry::storage::{
    InMemoryStorage, StorageError, StorageKey, StoragePrefix, StorageProvider,
};
use config_schema_registry::{ConfigSchemaRegistry, Owner};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Schema requiring an integer `port`, written in YAML.
pub const PORT_SCHEMA: &str = "type: object\nproperties:\n  port:\n    type: integer\nrequired:\n  - port\n";

/// The same schema written in JSON.
pub const PORT_SCHEMA_JSON: &str =
    r#"{"type": "object", "properties": {"port": {"type": "integer"}}, "required": ["port"]}"#;

/// Endpoint used by [`FailingStorage`] errors; must never reach a response.
pub const SECRET_ENDPOINT: &str = "10.1.2.3:2379";

/// Install a test logger once per process.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

pub fn alice() -> Owner {
    Owner::new("alice", "alice@example.com")
}

pub fn details(version: &str) -> SchemaDetails {
    SchemaDetails::new("team-a", "service-x", version)
}

pub fn registry() -> ConfigSchemaRegistry<InMemoryStorage> {
    init_logging();
    ConfigSchemaRegistry::with_defaults(InMemoryStorage::new())
}

pub fn handler() -> RegistryOperationHandler<InMemoryStorage> {
    RegistryOperationHandler::new(registry())
}

pub fn handler_with<S>(storage: S, timeout: Duration) -> RegistryOperationHandler<S>
where
    S: StorageProvider<Error = StorageError>,
{
    init_logging();
    let config = RegistryConfig::builder()
        .with_timeout(timeout)
        .build()
        .expect("valid test configuration");
    RegistryOperationHandler::new(ConfigSchemaRegistry::new(storage, &config))
}

/// Delegates to an in-memory backend after a fixed delay on every call.
#[derive(Clone)]
pub struct SlowStorage {
    inner: InMemoryStorage,
    delay: Duration,
}

impl SlowStorage {
    pub fn new(inner: InMemoryStorage, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl StorageProvider for SlowStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, value: Vec<u8>) -> Result<(), Self::Error> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(key, value).await
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(key).await
    }

    async fn delete(&self, key: StorageKey) -> Result<u64, Self::Error> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete(key).await
    }

    async fn scan_prefix(
        &self,
        prefix: StoragePrefix,
    ) -> Result<Vec<(StorageKey, Vec<u8>)>, Self::Error> {
        tokio::time::sleep(self.delay).await;
        self.inner.scan_prefix(prefix).await
    }
}

/// Fails every call with a network error, counting attempts.
#[derive(Clone, Default)]
pub struct FailingStorage {
    calls: Arc<AtomicUsize>,
}

impl FailingStorage {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> StorageError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StorageError::network_at("connection refused", SECRET_ENDPOINT)
    }
}

impl StorageProvider for FailingStorage {
    type Error = StorageError;

    async fn put(&self, _key: StorageKey, _value: Vec<u8>) -> Result<(), Self::Error> {
        Err(self.fail())
    }

    async fn get(&self, _key: StorageKey) -> Result<Option<Vec<u8>>, Self::Error> {
        Err(self.fail())
    }

    async fn delete(&self, _key: StorageKey) -> Result<u64, Self::Error> {
        Err(self.fail())
    }

    async fn scan_prefix(
        &self,
        _prefix: StoragePrefix,
    ) -> Result<Vec<(StorageKey, Vec<u8>)>, Self::Error> {
        Err(self.fail())
    }
}
