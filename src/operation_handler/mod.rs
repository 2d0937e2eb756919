//! Framework-agnostic registry operation handler.
//!
//! This module provides structured request/response handling for registry operations,
//! leaving transport framing (gRPC, HTTP, ...) to the caller. Requests are validated for
//! field presence before they reach the registry, and every outcome, including failures,
//! is reported as a [`RegistryResponse`] with a [`Status`].
//!
//! # Key Types
//!
//! - [`RegistryOperationHandler`] - Main handler for processing registry operations
//! - [`RegistryRequest`] - Any of the five per-operation request types
//! - [`RegistryResponse`] - Status, message, payload and metadata
//!
//! # Examples
//!
//! ```rust
//! use config_schema_registry::operation_handler::{
//!     GetSchemaRequest, RegistryOperationHandler, SchemaDetails, Status,
//! };
//! use config_schema_registry::storage::InMemoryStorage;
//! use config_schema_registry::{ConfigSchemaRegistry, Owner};
//!
//! # async fn example() {
//! let registry = ConfigSchemaRegistry::with_defaults(InMemoryStorage::new());
//! let handler = RegistryOperationHandler::new(registry);
//!
//! let request = GetSchemaRequest::new(
//!     Owner::new("alice", "alice@example.com"),
//!     SchemaDetails::new("team-a", "service-x", "v1"),
//! );
//! let response = handler.handle_operation(request).await;
//! assert_eq!(response.status, Status::Ok);
//! assert_eq!(response.metadata.found, Some(false));
//! # }
//! ```

mod core;
mod errors;
mod handlers;
mod requests;

pub use core::{
    OperationMetadata, RegistryOperationHandler, RegistryOperationType, RegistryRequest,
    RegistryResponse, ResponseData, Status,
};

pub use requests::{
    DeleteSchemaRequest, GetSchemaRequest, ListVersionsRequest, SaveSchemaRequest, SchemaDetails,
    ValidateConfigurationRequest,
};

pub use errors::{INTERNAL_ERROR_MESSAGE, create_error_response};
