//! Registry configuration.
//!
//! Configuration is a plain value built once at process start, either from
//! [`RegistryConfig::default`] or through [`RegistryConfigBuilder`], and handed to the
//! storage backend and registry constructors. Nothing is read from ambient global state.
//!
//! # Example Usage
//!
//! ```rust
//! use config_schema_registry::config::RegistryConfig;
//! use config_schema_registry::validation::SchemaDraft;
//! use std::time::Duration;
//!
//! let config = RegistryConfig::builder()
//!     .with_endpoints(["etcd-0:2379", "etcd-1:2379"])
//!     .with_timeout(Duration::from_secs(2))
//!     .with_default_draft(SchemaDraft::Draft7)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.store.endpoints.len(), 2);
//! ```

use crate::error::{RegistryError, RegistryResult};
use crate::validation::SchemaDraft;
use std::time::Duration;

/// Default key-value store endpoint.
pub const DEFAULT_ENDPOINT: &str = "localhost:2379";

/// Default deadline applied to each store call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default deadline for establishing a store connection.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Top-level registry configuration.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub store: StoreConfig,
    pub validation: ValidationConfig,
}

impl RegistryConfig {
    /// Start building a configuration from defaults.
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::new()
    }
}

/// Connection settings for the key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store endpoints as `host:port`.
    pub endpoints: Vec<String>,
    /// Deadline for a single store call.
    pub timeout: Duration,
    /// Deadline for establishing a connection.
    pub dial_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_ENDPOINT.to_string()],
            timeout: DEFAULT_TIMEOUT,
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
        }
    }
}

/// Settings for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationConfig {
    /// Draft used when a schema does not declare `$schema`.
    pub default_draft: SchemaDraft,
}

/// Builder for [`RegistryConfig`].
#[derive(Debug, Clone, Default)]
pub struct RegistryConfigBuilder {
    config: RegistryConfig,
}

impl RegistryConfigBuilder {
    /// Create a builder seeded with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store endpoints.
    pub fn with_endpoints<I, E>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.config.store.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-call store deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.store.timeout = timeout;
        self
    }

    /// Set the connection deadline.
    pub fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.config.store.dial_timeout = dial_timeout;
        self
    }

    /// Set the draft used for schemas without `$schema`.
    pub fn with_default_draft(mut self, draft: SchemaDraft) -> Self {
        self.config.validation.default_draft = draft;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> RegistryResult<RegistryConfig> {
        let store = &self.config.store;

        if store.endpoints.is_empty() {
            return Err(RegistryError::configuration(
                "at least one store endpoint is required",
            ));
        }
        if let Some(blank) = store.endpoints.iter().find(|e| e.trim().is_empty()) {
            return Err(RegistryError::configuration(format!(
                "store endpoint '{}' is blank",
                blank
            )));
        }
        if store.timeout.is_zero() {
            return Err(RegistryError::configuration(
                "store timeout must be greater than zero",
            ));
        }
        if store.dial_timeout.is_zero() {
            return Err(RegistryError::configuration(
                "store dial timeout must be greater than zero",
            ));
        }

        Ok(self.config)
    }
}
