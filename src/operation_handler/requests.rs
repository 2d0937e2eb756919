//! Request types for registry operations.
//!
//! Each operation has its own request type. All of them implement [`HasTriplet`], so key
//! construction never depends on which request it was handed. Requests also carry the
//! calling user, which every operation requires, and an optional request id for tracing.
//!
//! Field-presence checks live here as `validate` methods. They run before anything
//! touches the store and produce the messages callers see on `InvalidArgument`.

use crate::error::{RegistryError, RegistryResult};
use crate::record::Owner;
use crate::triplet::{HasTriplet, SEPARATOR};
use serde::{Deserialize, Serialize};

/// The triplet as supplied by a caller.
///
/// `version` is left empty on requests that address every version of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaDetails {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl SchemaDetails {
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

    /// Details addressing every version of a schema.
    pub fn unversioned(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, "")
    }

    fn validate(&self, version_required: bool) -> RegistryResult<()> {
        if self.namespace.is_empty() {
            return Err(RegistryError::invalid_argument(
                "Schema namespace cannot be empty!",
            ));
        }
        if self.name.is_empty() {
            return Err(RegistryError::invalid_argument(
                "Schema name cannot be empty!",
            ));
        }
        if version_required && self.version.is_empty() {
            return Err(RegistryError::invalid_argument(
                "Schema version cannot be empty!",
            ));
        }
        if [&self.namespace, &self.name, &self.version]
            .iter()
            .any(|c| c.contains(SEPARATOR))
        {
            return Err(RegistryError::invalid_argument(
                "Schema details must not contain '/'!",
            ));
        }
        Ok(())
    }
}

impl HasTriplet for SchemaDetails {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> Option<&str> {
        Some(self.version.as_str()).filter(|v| !v.is_empty())
    }
}

fn validate_user(user: Option<&Owner>) -> RegistryResult<()> {
    let user = user.ok_or_else(|| RegistryError::invalid_argument("User cannot be empty!"))?;
    if user.email.is_empty() {
        return Err(RegistryError::invalid_argument(
            "User's email cannot be empty!",
        ));
    }
    if user.username.is_empty() {
        return Err(RegistryError::invalid_argument(
            "User's username cannot be empty!",
        ));
    }
    Ok(())
}

fn validate_details(details: Option<&SchemaDetails>, version_required: bool) -> RegistryResult<()> {
    details
        .ok_or_else(|| RegistryError::invalid_argument("Schema details cannot be empty!"))?
        .validate(version_required)
}

macro_rules! impl_has_triplet {
    ($request:ty, versioned = $versioned:expr) => {
        impl HasTriplet for $request {
            fn namespace(&self) -> &str {
                self.details.as_ref().map_or("", |d| d.namespace.as_str())
            }

            fn name(&self) -> &str {
                self.details.as_ref().map_or("", |d| d.name.as_str())
            }

            fn version(&self) -> Option<&str> {
                if $versioned {
                    self.details.as_ref().and_then(|d| HasTriplet::version(d))
                } else {
                    None
                }
            }
        }
    };
}

/// Save a schema under a triplet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaveSchemaRequest {
    pub user: Option<Owner>,
    pub details: Option<SchemaDetails>,
    pub schema: String,
    pub request_id: Option<String>,
}

impl SaveSchemaRequest {
    pub fn new(user: Owner, details: SchemaDetails, schema: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            details: Some(details),
            schema: schema.into(),
            request_id: None,
        }
    }

    /// Set the request id used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Check field presence. Schema well-formedness is checked separately.
    pub fn validate(&self) -> RegistryResult<()> {
        validate_user(self.user.as_ref())?;
        validate_details(self.details.as_ref(), true)?;
        if self.schema.is_empty() {
            return Err(RegistryError::invalid_argument("Schema cannot be empty!"));
        }
        Ok(())
    }
}

impl_has_triplet!(SaveSchemaRequest, versioned = true);

/// Fetch the schema stored under a triplet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetSchemaRequest {
    pub user: Option<Owner>,
    pub details: Option<SchemaDetails>,
    pub request_id: Option<String>,
}

impl GetSchemaRequest {
    pub fn new(user: Owner, details: SchemaDetails) -> Self {
        Self {
            user: Some(user),
            details: Some(details),
            request_id: None,
        }
    }

    /// Set the request id used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn validate(&self) -> RegistryResult<()> {
        validate_user(self.user.as_ref())?;
        validate_details(self.details.as_ref(), true)
    }
}

impl_has_triplet!(GetSchemaRequest, versioned = true);

/// Delete the schema stored under a triplet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteSchemaRequest {
    pub user: Option<Owner>,
    pub details: Option<SchemaDetails>,
    pub request_id: Option<String>,
}

impl DeleteSchemaRequest {
    pub fn new(user: Owner, details: SchemaDetails) -> Self {
        Self {
            user: Some(user),
            details: Some(details),
            request_id: None,
        }
    }

    /// Set the request id used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn validate(&self) -> RegistryResult<()> {
        validate_user(self.user.as_ref())?;
        validate_details(self.details.as_ref(), true)
    }
}

impl_has_triplet!(DeleteSchemaRequest, versioned = true);

/// List every version stored under a namespace and name.
///
/// A version in `details` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListVersionsRequest {
    pub user: Option<Owner>,
    pub details: Option<SchemaDetails>,
    pub request_id: Option<String>,
}

impl ListVersionsRequest {
    pub fn new(user: Owner, details: SchemaDetails) -> Self {
        Self {
            user: Some(user),
            details: Some(details),
            request_id: None,
        }
    }

    /// Set the request id used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn validate(&self) -> RegistryResult<()> {
        validate_user(self.user.as_ref())?;
        validate_details(self.details.as_ref(), false)
    }
}

impl_has_triplet!(ListVersionsRequest, versioned = false);

/// Validate a configuration document against a stored schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidateConfigurationRequest {
    pub user: Option<Owner>,
    pub details: Option<SchemaDetails>,
    pub configuration: String,
    pub request_id: Option<String>,
}

impl ValidateConfigurationRequest {
    pub fn new(user: Owner, details: SchemaDetails, configuration: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            details: Some(details),
            configuration: configuration.into(),
            request_id: None,
        }
    }

    /// Set the request id used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn validate(&self) -> RegistryResult<()> {
        validate_user(self.user.as_ref())?;
        validate_details(self.details.as_ref(), true)?;
        if self.configuration.is_empty() {
            return Err(RegistryError::invalid_argument(
                "Configuration cannot be empty!",
            ));
        }
        Ok(())
    }
}

impl_has_triplet!(ValidateConfigurationRequest, versioned = true);
