//! Error types for registry operations.
//!
//! [`RegistryError`] is the single error type returned by the typed registry API. Each
//! variant corresponds to one class of failure a caller can act on differently: a bad
//! argument, a document that does not parse or compile, a missing schema, or a store
//! failure.

use crate::storage::StorageError;
use crate::triplet::KeyError;
use crate::validation::ValidatorError;

/// Main error type for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A request argument is missing or malformed
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A triplet cannot be turned into a storage key
    #[error("Invalid argument: {0}")]
    Key(#[from] KeyError),

    /// A configuration or schema document failed to parse or compile
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    /// No schema is stored at the requested key
    #[error("No schema found for key '{key}'")]
    NotFound { key: String },

    /// The key-value store failed or missed its deadline
    #[error("Store error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid registry configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RegistryError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error for a storage key.
    pub fn not_found(key: impl ToString) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the caller supplied a bad argument or document.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            RegistryError::InvalidArgument { .. }
                | RegistryError::Key(_)
                | RegistryError::Validator(_)
        )
    }

    /// Whether the error is a missing schema.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    /// Whether the error came from the store or an internal fault.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RegistryError::Storage(_)
                | RegistryError::Configuration { .. }
                | RegistryError::Internal { .. }
        )
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
