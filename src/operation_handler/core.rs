//! Core operation handler infrastructure
//!
//! This module contains the request and response envelopes and the dispatcher that routes
//! each request to its handler.

use super::requests::{
    DeleteSchemaRequest, GetSchemaRequest, ListVersionsRequest, SaveSchemaRequest,
    ValidateConfigurationRequest,
};
use crate::record::SchemaRecord;
use crate::registry::ConfigSchemaRegistry;
use crate::storage::{StorageError, StorageProvider};
use crate::validation::Violation;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport-agnostic handler for registry operations.
///
/// Every request produces a [`RegistryResponse`]; failures are reported through its
/// status rather than returned as errors.
#[derive(Debug, Clone)]
pub struct RegistryOperationHandler<S> {
    pub(super) registry: ConfigSchemaRegistry<S>,
}

/// Any request the handler accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryRequest {
    Save(SaveSchemaRequest),
    Get(GetSchemaRequest),
    Delete(DeleteSchemaRequest),
    ListVersions(ListVersionsRequest),
    Validate(ValidateConfigurationRequest),
}

impl RegistryRequest {
    /// The operation this request asks for.
    pub fn operation(&self) -> RegistryOperationType {
        match self {
            RegistryRequest::Save(_) => RegistryOperationType::Save,
            RegistryRequest::Get(_) => RegistryOperationType::Get,
            RegistryRequest::Delete(_) => RegistryOperationType::Delete,
            RegistryRequest::ListVersions(_) => RegistryOperationType::ListVersions,
            RegistryRequest::Validate(_) => RegistryOperationType::Validate,
        }
    }

    /// The caller-supplied request id, if any.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            RegistryRequest::Save(r) => r.request_id.as_deref(),
            RegistryRequest::Get(r) => r.request_id.as_deref(),
            RegistryRequest::Delete(r) => r.request_id.as_deref(),
            RegistryRequest::ListVersions(r) => r.request_id.as_deref(),
            RegistryRequest::Validate(r) => r.request_id.as_deref(),
        }
    }
}

impl From<SaveSchemaRequest> for RegistryRequest {
    fn from(request: SaveSchemaRequest) -> Self {
        RegistryRequest::Save(request)
    }
}

impl From<GetSchemaRequest> for RegistryRequest {
    fn from(request: GetSchemaRequest) -> Self {
        RegistryRequest::Get(request)
    }
}

impl From<DeleteSchemaRequest> for RegistryRequest {
    fn from(request: DeleteSchemaRequest) -> Self {
        RegistryRequest::Delete(request)
    }
}

impl From<ListVersionsRequest> for RegistryRequest {
    fn from(request: ListVersionsRequest) -> Self {
        RegistryRequest::ListVersions(request)
    }
}

impl From<ValidateConfigurationRequest> for RegistryRequest {
    fn from(request: ValidateConfigurationRequest) -> Self {
        RegistryRequest::Validate(request)
    }
}

/// Types of registry operations supported by the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryOperationType {
    /// Save a schema version, replacing any existing one
    Save,
    /// Fetch a schema version
    Get,
    /// Delete a schema version
    Delete,
    /// List every version of a schema
    ListVersions,
    /// Validate a configuration against a stored schema
    Validate,
}

impl fmt::Display for RegistryOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistryOperationType::Save => "save",
            RegistryOperationType::Get => "get",
            RegistryOperationType::Delete => "delete",
            RegistryOperationType::ListVersions => "list_versions",
            RegistryOperationType::Validate => "validate",
        };
        f.write_str(name)
    }
}

/// Outcome class of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ok,
    InvalidArgument,
    NotFound,
    Internal,
}

impl Status {
    /// Numeric code, aligned with gRPC status codes.
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::InvalidArgument => 3,
            Status::NotFound => 5,
            Status::Internal => 13,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "OK",
            Status::InvalidArgument => "INVALID_ARGUMENT",
            Status::NotFound => "NOT_FOUND",
            Status::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

/// Operation-specific payload of a response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseData {
    #[default]
    None,
    /// A single schema version (Save, Get)
    Schema(SchemaRecord),
    /// Every version of a schema (ListVersions)
    Versions(Vec<SchemaRecord>),
    /// Validation outcome (Validate)
    Validation {
        is_valid: bool,
        first_violation: Option<Violation>,
    },
}

/// Structured response from registry operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryResponse {
    /// Outcome class
    pub status: Status,
    /// Human-readable description of the outcome
    pub message: String,
    /// Payload, if the operation produces one
    pub data: ResponseData,
    /// Contextual information about the operation
    pub metadata: OperationMetadata,
}

impl RegistryResponse {
    /// Whether the operation completed with `Status::Ok`.
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// The schema returned by Save or Get.
    pub fn schema(&self) -> Option<&SchemaRecord> {
        match &self.data {
            ResponseData::Schema(record) => Some(record),
            _ => None,
        }
    }

    /// The versions returned by ListVersions, empty for other operations.
    pub fn versions(&self) -> &[SchemaRecord] {
        match &self.data {
            ResponseData::Versions(records) => records,
            _ => &[],
        }
    }

    /// The validation verdict, for Validate responses that reached evaluation.
    pub fn is_valid(&self) -> Option<bool> {
        match &self.data {
            ResponseData::Validation { is_valid, .. } => Some(*is_valid),
            _ => None,
        }
    }

    /// The first violation reported by Validate.
    pub fn first_violation(&self) -> Option<&Violation> {
        match &self.data {
            ResponseData::Validation {
                first_violation, ..
            } => first_violation.as_ref(),
            _ => None,
        }
    }
}

/// Metadata about a registry operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMetadata {
    /// Operation that produced the response
    pub operation: RegistryOperationType,
    /// Request ID for tracing
    pub request_id: String,
    /// Storage key or prefix the operation addressed, once derived
    pub key: Option<String>,
    /// Whether a schema was found (Get, Delete)
    pub found: Option<bool>,
    /// Number of versions returned (ListVersions)
    pub version_count: Option<usize>,
    /// Content fingerprint of the schema involved (Save, Get)
    pub fingerprint: Option<String>,
}

impl OperationMetadata {
    pub(super) fn new(operation: RegistryOperationType, request_id: &str) -> Self {
        Self {
            operation,
            request_id: request_id.to_string(),
            key: None,
            found: None,
            version_count: None,
            fingerprint: None,
        }
    }
}

impl<S> RegistryOperationHandler<S>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    /// Create a new operation handler around a registry.
    pub fn new(registry: ConfigSchemaRegistry<S>) -> Self {
        Self { registry }
    }

    /// Get access to the underlying registry.
    pub fn registry(&self) -> &ConfigSchemaRegistry<S> {
        &self.registry
    }

    /// Handle a registry request.
    ///
    /// This is the main entry point that dispatches to specific operation handlers
    /// based on the request type.
    pub async fn handle_operation(&self, request: impl Into<RegistryRequest>) -> RegistryResponse {
        let request = request.into();
        let operation = request.operation();
        let request_id = request
            .request_id()
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Registry operation handler processing {} (request: '{}')",
            operation, request_id
        );

        let result = match request {
            RegistryRequest::Save(r) => super::handlers::schema::handle_save(self, r, &request_id).await,
            RegistryRequest::Get(r) => super::handlers::schema::handle_get(self, r, &request_id).await,
            RegistryRequest::Delete(r) => {
                super::handlers::schema::handle_delete(self, r, &request_id).await
            }
            RegistryRequest::ListVersions(r) => {
                super::handlers::schema::handle_list_versions(self, r, &request_id).await
            }
            RegistryRequest::Validate(r) => {
                super::handlers::validate::handle_validate(self, r, &request_id).await
            }
        };

        match &result {
            Ok(response) => {
                debug!(
                    "Registry operation {} completed with {} (request: '{}')",
                    operation, response.status, request_id
                );
            }
            Err(e) => {
                warn!(
                    "Registry operation {} failed: {} (request: '{}')",
                    operation, e, request_id
                );
            }
        }

        result.unwrap_or_else(|e| super::errors::create_error_response(e, operation, request_id))
    }
}
