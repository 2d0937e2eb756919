//! Schema operation handlers
//!
//! Handlers for Save, Get, Delete and ListVersions. Each checks the request, derives the
//! key, calls the registry and builds the response. Errors are returned to the dispatcher,
//! which maps them onto a status.

use crate::{
    error::{RegistryError, RegistryResult},
    operation_handler::{
        core::{
            OperationMetadata, RegistryOperationHandler, RegistryOperationType, RegistryResponse,
            ResponseData, Status,
        },
        requests::{DeleteSchemaRequest, GetSchemaRequest, ListVersionsRequest, SaveSchemaRequest},
    },
    storage::{StorageError, StorageProvider},
    triplet::{build_key, build_prefix},
};

/// Handle save operations.
pub async fn handle_save<S>(
    handler: &RegistryOperationHandler<S>,
    request: SaveSchemaRequest,
    request_id: &str,
) -> RegistryResult<RegistryResponse>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    request.validate()?;
    let key = build_key(&request)?;
    handler.registry.validator().check_schema(&request.schema)?;

    let owner = request
        .user
        .clone()
        .ok_or_else(|| RegistryError::invalid_argument("User cannot be empty!"))?;
    let record = handler.registry.save(&request, &request.schema, owner).await?;

    let mut metadata = OperationMetadata::new(RegistryOperationType::Save, request_id);
    metadata.key = Some(key.to_string());
    metadata.fingerprint = Some(record.fingerprint());

    Ok(RegistryResponse {
        status: Status::Ok,
        message: "Configuration schema saved successfully!".to_string(),
        data: ResponseData::Schema(record),
        metadata,
    })
}

/// Handle get operations.
///
/// A missing schema is an `Ok` response with no payload and `found = false`.
pub async fn handle_get<S>(
    handler: &RegistryOperationHandler<S>,
    request: GetSchemaRequest,
    request_id: &str,
) -> RegistryResult<RegistryResponse>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    request.validate()?;
    let key = build_key(&request)?;

    let mut metadata = OperationMetadata::new(RegistryOperationType::Get, request_id);
    metadata.key = Some(key.to_string());

    match handler.registry.get(&request).await? {
        Some(record) => {
            metadata.found = Some(true);
            metadata.fingerprint = Some(record.fingerprint());
            Ok(RegistryResponse {
                status: Status::Ok,
                message: "Configuration schema retrieved successfully!".to_string(),
                data: ResponseData::Schema(record),
                metadata,
            })
        }
        None => {
            metadata.found = Some(false);
            Ok(RegistryResponse {
                status: Status::Ok,
                message: format!("No schema found for key '{}'", key),
                data: ResponseData::None,
                metadata,
            })
        }
    }
}

/// Handle delete operations.
///
/// Deleting a schema that does not exist succeeds.
pub async fn handle_delete<S>(
    handler: &RegistryOperationHandler<S>,
    request: DeleteSchemaRequest,
    request_id: &str,
) -> RegistryResult<RegistryResponse>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    request.validate()?;
    let key = build_key(&request)?;
    let deleted = handler.registry.delete(&request).await?;

    let mut metadata = OperationMetadata::new(RegistryOperationType::Delete, request_id);
    metadata.key = Some(key.to_string());
    metadata.found = Some(deleted);

    let message = if deleted {
        "Configuration schema deleted successfully!".to_string()
    } else {
        format!("No schema found for key '{}', nothing to delete", key)
    };

    Ok(RegistryResponse {
        status: Status::Ok,
        message,
        data: ResponseData::None,
        metadata,
    })
}

/// Handle list versions operations.
pub async fn handle_list_versions<S>(
    handler: &RegistryOperationHandler<S>,
    request: ListVersionsRequest,
    request_id: &str,
) -> RegistryResult<RegistryResponse>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    request.validate()?;
    let prefix = build_prefix(&request)?;
    let records = handler.registry.list_versions(&request).await?;

    let mut metadata = OperationMetadata::new(RegistryOperationType::ListVersions, request_id);
    metadata.key = Some(prefix.to_string());
    metadata.version_count = Some(records.len());

    let message = if records.is_empty() {
        format!("No versions found for schema '{}'", prefix)
    } else {
        format!(
            "Found {} version(s) of schema '{}'",
            records.len(),
            prefix
        )
    };

    Ok(RegistryResponse {
        status: Status::Ok,
        message,
        data: ResponseData::Versions(records),
        metadata,
    })
}
