//! Storage-specific error types for key-value operations.
//!
//! These errors describe failures talking to the key-value store, separate from request
//! validation and schema validation errors. Absence of a key is never an error at this
//! layer.

use std::fmt;
use std::time::Duration;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// The call did not complete within its deadline.
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Storage backend is temporarily unavailable.
    Unavailable { message: String },

    /// Network-related error reaching a distributed store.
    Network {
        message: String,
        endpoint: Option<String>,
    },

    /// A stored value could not be encoded or decoded.
    Serialization {
        message: String,
        data_type: Option<String>,
    },

    /// Corruption detected in stored data, such as a key that does not parse.
    DataCorruption { key: String, details: String },

    /// Configuration error in the storage backend.
    Configuration {
        message: String,
        parameter: Option<String>,
    },

    /// Generic internal storage error.
    Internal {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout during {} after {:?}", operation, duration)
            }
            StorageError::Unavailable { message } => {
                write!(f, "Storage unavailable: {}", message)
            }
            StorageError::Network { message, endpoint } => {
                if let Some(ep) = endpoint {
                    write!(f, "Network error: {} (endpoint: {})", message, ep)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            StorageError::Serialization { message, data_type } => {
                if let Some(dtype) = data_type {
                    write!(f, "Serialization error: {} (type: {})", message, dtype)
                } else {
                    write!(f, "Serialization error: {}", message)
                }
            }
            StorageError::DataCorruption { key, details } => {
                write!(f, "Data corruption at '{}': {}", key, details)
            }
            StorageError::Configuration { message, parameter } => {
                if let Some(param) = parameter {
                    write!(f, "Configuration error: {} (parameter: {})", message, param)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            StorageError::Internal { message, .. } => {
                write!(f, "Internal storage error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Internal { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl StorageError {
    /// Create a new Timeout error.
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new Unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new Network error naming the endpoint that failed.
    pub fn network_at(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a new Serialization error for a named type.
    pub fn serialization_of(message: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
            data_type: Some(data_type.into()),
        }
    }

    /// Create a new DataCorruption error.
    pub fn data_corruption(key: impl Into<String>, details: impl Into<String>) -> Self {
        Self::DataCorruption {
            key: key.into(),
            details: details.into(),
        }
    }

    /// Create a new Configuration error for the named parameter.
    pub fn configuration(message: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            parameter: Some(parameter.into()),
        }
    }

    /// Create a new Internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Check if this error is a missed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, StorageError::Timeout { .. })
    }

    /// Check if this error indicates a temporary failure that might succeed on retry.
    ///
    /// The registry never retries on its own; this is for callers deciding whether to
    /// re-issue an operation.
    pub fn is_temporary(&self) -> bool {
        matches!(
            self,
            StorageError::Unavailable { .. }
                | StorageError::Timeout { .. }
                | StorageError::Network { .. }
        )
    }

    /// Check if this error indicates unreadable stored data.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StorageError::DataCorruption { .. } | StorageError::Serialization { .. }
        )
    }
}
