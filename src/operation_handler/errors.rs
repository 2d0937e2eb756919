//! Error handling utilities for operation handlers
//!
//! Maps [`RegistryError`] onto the response status taxonomy. Store failures are reported
//! with a generic message; their details only ever reach the log.

use crate::error::RegistryError;
use crate::operation_handler::core::{
    OperationMetadata, RegistryOperationType, RegistryResponse, ResponseData, Status,
};
use log::warn;

/// Message returned for every store or internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error while accessing the schema store";

/// Create an error response from a RegistryError.
pub fn create_error_response(
    error: RegistryError,
    operation: RegistryOperationType,
    request_id: String,
) -> RegistryResponse {
    let (status, message) = match &error {
        RegistryError::InvalidArgument { message } => (Status::InvalidArgument, message.clone()),
        RegistryError::Key(e) => (Status::InvalidArgument, e.to_string()),
        RegistryError::Validator(e) => (Status::InvalidArgument, e.to_string()),
        RegistryError::NotFound { .. } => (Status::NotFound, error.to_string()),
        RegistryError::Storage(e) => {
            warn!(
                "Store failure during {} (request: '{}', temporary: {}): {}",
                operation,
                request_id,
                e.is_temporary(),
                e
            );
            (Status::Internal, INTERNAL_ERROR_MESSAGE.to_string())
        }
        RegistryError::Configuration { .. } | RegistryError::Internal { .. } => {
            warn!(
                "Internal failure during {} (request: '{}'): {}",
                operation, request_id, error
            );
            (Status::Internal, INTERNAL_ERROR_MESSAGE.to_string())
        }
    };

    RegistryResponse {
        status,
        message,
        data: ResponseData::None,
        metadata: OperationMetadata::new(operation, &request_id),
    }
}
