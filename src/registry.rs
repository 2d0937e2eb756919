//! Registry facade.
//!
//! [`ConfigSchemaRegistry`] composes key construction, the schema store and the
//! configuration validator into the five registry operations. It holds no mutable state
//! of its own: every call derives its key, makes fresh round trips to the store, and
//! returns a typed result.

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::record::{Owner, SchemaRecord, StoredSchema};
use crate::storage::{StorageError, StorageProvider};
use crate::store::SchemaStore;
use crate::triplet::{HasTriplet, build_key, build_prefix};
use crate::validation::{ConfigValidator, ValidationResult};
use log::{debug, info, warn};

/// Registry of versioned configuration schemas.
///
/// # Example Usage
///
/// ```rust
/// use config_schema_registry::{ConfigSchemaRegistry, Owner, SchemaTriplet};
/// use config_schema_registry::storage::InMemoryStorage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = ConfigSchemaRegistry::with_defaults(InMemoryStorage::new());
/// let triplet = SchemaTriplet::new("team-a", "service-x", "v1");
///
/// registry
///     .save(&triplet, "type: object", Owner::new("alice", "alice@example.com"))
///     .await?;
///
/// let result = registry.validate(&triplet, "port: 8080").await?;
/// assert!(result.valid);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSchemaRegistry<S> {
    store: SchemaStore<S>,
    validator: ConfigValidator,
}

impl<S> ConfigSchemaRegistry<S>
where
    S: StorageProvider,
    S::Error: Into<StorageError>,
{
    /// Create a registry over `storage` using `config`.
    pub fn new(storage: S, config: &RegistryConfig) -> Self {
        Self {
            store: SchemaStore::new(storage, &config.store),
            validator: ConfigValidator::new(config.validation.default_draft),
        }
    }

    /// Create a registry with default configuration.
    pub fn with_defaults(storage: S) -> Self {
        Self::new(storage, &RegistryConfig::default())
    }

    /// The validator used for Validate and schema checks.
    pub fn validator(&self) -> &ConfigValidator {
        &self.validator
    }

    /// The underlying schema store.
    pub fn store(&self) -> &SchemaStore<S> {
        &self.store
    }

    /// Save `schema` under `triplet`, replacing any existing version.
    ///
    /// The schema text is stored as given. Concurrent saves to the same triplet race and
    /// the last write to land wins without any signal to the others.
    pub async fn save<T>(&self, triplet: &T, schema: &str, owner: Owner) -> RegistryResult<SchemaRecord>
    where
        T: HasTriplet + Sync + ?Sized,
    {
        let key = build_key(triplet)?;
        let stored = StoredSchema::new(owner, schema);

        self.store.save(&key, &stored).await?;
        info!("Saved schema {} for user {}", key, stored.user.username);

        Ok(SchemaRecord::from_stored(&key, stored))
    }

    /// Fetch the schema stored under `triplet`.
    ///
    /// # Returns
    /// `Some(record)` if a schema exists, `None` otherwise.
    pub async fn get<T>(&self, triplet: &T) -> RegistryResult<Option<SchemaRecord>>
    where
        T: HasTriplet + Sync + ?Sized,
    {
        let key = build_key(triplet)?;
        let stored = self.store.get(&key).await?;
        debug!("Get {} found={}", key, stored.is_some());

        Ok(stored.map(|s| SchemaRecord::from_stored(&key, s)))
    }

    /// Delete the schema stored under `triplet`.
    ///
    /// # Returns
    /// `true` if a schema was removed, `false` if none existed. Neither case is an error.
    pub async fn delete<T>(&self, triplet: &T) -> RegistryResult<bool>
    where
        T: HasTriplet + Sync + ?Sized,
    {
        let key = build_key(triplet)?;
        let deleted = self.store.delete(&key).await?;

        if deleted > 0 {
            info!("Deleted schema {}", key);
        } else {
            warn!("Delete of {} found no schema", key);
        }
        Ok(deleted > 0)
    }

    /// Every stored version under the triplet's namespace and name, ordered by key.
    ///
    /// The version component of `triplet`, if any, is ignored.
    pub async fn list_versions<T>(&self, triplet: &T) -> RegistryResult<Vec<SchemaRecord>>
    where
        T: HasTriplet + Sync + ?Sized,
    {
        let prefix = build_prefix(triplet)?;
        let records = self.store.list_by_prefix(&prefix).await?;
        debug!("Listed {} versions under {}", records.len(), prefix);

        Ok(records)
    }

    /// Validate `configuration` against the schema stored under `triplet`.
    ///
    /// Fails with [`RegistryError::NotFound`] when no schema is stored there.
    pub async fn validate<T>(&self, triplet: &T, configuration: &str) -> RegistryResult<ValidationResult>
    where
        T: HasTriplet + Sync + ?Sized,
    {
        let key = build_key(triplet)?;
        let stored = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| RegistryError::not_found(&key))?;

        let result = self.validator.validate(configuration, &stored.schema)?;
        debug!(
            "Validated configuration against {}: valid={}",
            key, result.valid
        );
        Ok(result)
    }
}
