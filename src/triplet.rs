//! Triplet addressing and storage key construction.
//!
//! Every schema version is addressed by a `(namespace, name, version)` triplet. The triplet
//! is flattened into a single key of the form `namespace/name/version`, and all versions of a
//! schema share the `namespace/name` prefix. Version enumeration is therefore a range scan
//! over the key space rather than a lookup in a secondary index.
//!
//! Key construction is only total over components that are non-empty and free of the
//! reserved [`SEPARATOR`]. Both conditions are checked here and reported as [`KeyError`].
//!
//! # Example Usage
//!
//! ```rust
//! use config_schema_registry::triplet::{SchemaTriplet, build_key, build_prefix};
//!
//! let triplet = SchemaTriplet::new("team-a", "service-x", "v1");
//! let key = build_key(&triplet).unwrap();
//! assert_eq!(key.to_string(), "team-a/service-x/v1");
//!
//! let prefix = build_prefix(&triplet).unwrap();
//! assert_eq!(prefix.to_string(), "team-a/service-x");
//! ```

use crate::storage::{StorageKey, StoragePrefix};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved character joining triplet components into a storage key.
pub const SEPARATOR: char = '/';

/// Capability shared by every request that addresses a schema.
///
/// Key construction depends only on this trait, never on concrete request types.
/// Requests that address all versions of a schema (version listing) return `None`
/// from [`HasTriplet::version`].
pub trait HasTriplet {
    /// Namespace the schema belongs to.
    fn namespace(&self) -> &str;

    /// Name of the schema within its namespace.
    fn name(&self) -> &str;

    /// Version of the schema, if the request addresses a single version.
    fn version(&self) -> Option<&str>;
}

/// One component of a triplet, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Namespace,
    Name,
    Version,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Namespace => write!(f, "namespace"),
            Component::Name => write!(f, "name"),
            Component::Version => write!(f, "version"),
        }
    }
}

/// Errors raised when a triplet cannot be turned into a storage key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// A component is empty.
    #[error("Schema {component} cannot be empty")]
    Empty { component: Component },

    /// A component contains the reserved separator.
    #[error("Schema {component} '{value}' must not contain '/'")]
    ContainsSeparator { component: Component, value: String },

    /// A raw key read back from storage does not have the `namespace/name/version` shape.
    #[error("Malformed storage key: '{key}'")]
    Malformed { key: String },
}

/// A plain owned triplet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaTriplet {
    pub namespace: String,
    pub name: String,
    pub version: String,
}

impl SchemaTriplet {
    /// Create a new triplet. Components are not validated until a key is built.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl HasTriplet for SchemaTriplet {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Option<&str> {
        Some(&self.version)
    }
}

impl fmt::Display for SchemaTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.namespace, self.name, self.version
        )
    }
}

/// Check a single triplet component.
pub fn validate_component(component: Component, value: &str) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::Empty { component });
    }
    if value.contains(SEPARATOR) {
        return Err(KeyError::ContainsSeparator {
            component,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Derive the storage key `namespace/name/version` for a triplet.
pub fn build_key<T: HasTriplet + ?Sized>(triplet: &T) -> Result<StorageKey, KeyError> {
    validate_component(Component::Namespace, triplet.namespace())?;
    validate_component(Component::Name, triplet.name())?;
    let version = triplet.version().unwrap_or_default();
    validate_component(Component::Version, version)?;

    Ok(StorageKey::new(
        triplet.namespace(),
        triplet.name(),
        version,
    ))
}

/// Derive the storage prefix `namespace/name` shared by all versions of a schema.
///
/// The version component, if any, is ignored.
pub fn build_prefix<T: HasTriplet + ?Sized>(triplet: &T) -> Result<StoragePrefix, KeyError> {
    validate_component(Component::Namespace, triplet.namespace())?;
    validate_component(Component::Name, triplet.name())?;

    Ok(StorageKey::prefix(triplet.namespace(), triplet.name()))
}
