//! Registry for named, versioned configuration schemas.
//!
//! Schemas are saved under a `(namespace, name, version)` triplet in a strongly-consistent
//! key-value store, and configuration documents written in YAML or JSON are validated
//! against them.
//!
//! # Core Components
//!
//! - [`ConfigSchemaRegistry`] - Save, Get, Delete, ListVersions and Validate
//! - [`storage::StorageProvider`] - Trait for implementing key-value backends
//! - [`validation::ConfigValidator`] - YAML/JSON canonicalisation and JSON-Schema evaluation
//! - [`operation_handler::RegistryOperationHandler`] - Request/response layer for transports
//!
//! # Quick Start
//!
//! ```rust
//! use config_schema_registry::{ConfigSchemaRegistry, Owner, SchemaTriplet};
//! use config_schema_registry::storage::InMemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ConfigSchemaRegistry::with_defaults(InMemoryStorage::new());
//! let triplet = SchemaTriplet::new("team-a", "service-x", "v1");
//!
//! registry
//!     .save(&triplet, "type: object\nproperties:\n  port:\n    type: integer\n",
//!           Owner::new("alice", "alice@example.com"))
//!     .await?;
//!
//! let result = registry.validate(&triplet, "port: not-a-number").await?;
//! assert!(!result.valid);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod operation_handler;
pub mod record;
pub mod registry;
pub mod storage;
pub mod store;
pub mod triplet;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{RegistryConfig, RegistryConfigBuilder};
pub use error::{RegistryError, RegistryResult};
pub use record::{Owner, SchemaRecord};
pub use registry::ConfigSchemaRegistry;
pub use store::SchemaStore;
pub use triplet::{HasTriplet, SchemaTriplet, build_key, build_prefix};
pub use validation::{ConfigValidator, SchemaDraft, ValidationResult, Violation};

pub use operation_handler::{RegistryOperationHandler, RegistryResponse, Status};
