//! Configuration validation handler

use crate::{
    error::RegistryResult,
    operation_handler::{
        core::{
            OperationMetadata, RegistryOperationHandler, RegistryOperationType, RegistryResponse,
            ResponseData, Status,
        },
        requests::ValidateConfigurationRequest,
    },
    storage::{StorageError, StorageProvider},
    triplet::build_key,
};

/// Handle validate operations.
///
/// A configuration that breaks its schema is still an `Ok` response: the request was
/// served, and the verdict is in the payload. The success message is only used when no
/// violation was recorded.
pub async fn handle_validate<S>(
    handler: &RegistryOperationHandler<S>,
    request: ValidateConfigurationRequest,
    request_id: &str,
) -> RegistryResult<RegistryResponse>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    request.validate()?;
    let key = build_key(&request)?;
    let result = handler
        .registry
        .validate(&request, &request.configuration)
        .await?;

    let mut metadata = OperationMetadata::new(RegistryOperationType::Validate, request_id);
    metadata.key = Some(key.to_string());
    metadata.found = Some(true);

    let first_violation = result.first_violation().cloned();
    let message = match &first_violation {
        None => "Configuration is valid!".to_string(),
        Some(violation) => format!("Configuration is not valid: {}", violation),
    };

    Ok(RegistryResponse {
        status: Status::Ok,
        message,
        data: ResponseData::Validation {
            is_valid: result.valid,
            first_violation,
        },
        metadata,
    })
}
