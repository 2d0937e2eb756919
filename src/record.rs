//! Schema records and their persisted layout.
//!
//! [`StoredSchema`] is what the store holds under each key: the owner, the schema text
//! exactly as submitted, and the creation time. The triplet is not repeated in the value
//! because it is recoverable from the key. [`SchemaRecord`] joins the two back together
//! for callers.

use crate::storage::StorageKey;
use crate::triplet::{HasTriplet, SchemaTriplet};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identity of the user who saved a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub username: String,
    pub email: String,
}

impl Owner {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// The value persisted under a schema key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSchema {
    pub user: Owner,
    pub schema: String,
    pub creation_time: DateTime<Utc>,
}

impl StoredSchema {
    /// Create a record stamped with the current time.
    pub fn new(user: Owner, schema: impl Into<String>) -> Self {
        Self {
            user,
            schema: schema.into(),
            creation_time: Utc::now(),
        }
    }

    /// Encode for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a stored value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// One stored schema version together with its triplet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub schema: String,
    pub owner: Owner,
    pub creation_time: DateTime<Utc>,
}

impl SchemaRecord {
    /// Reassemble a record from its key and stored value.
    pub fn from_stored(key: &StorageKey, stored: StoredSchema) -> Self {
        Self {
            namespace: key.namespace().to_string(),
            name: key.name().to_string(),
            version: key.version().to_string(),
            schema: stored.schema,
            owner: stored.user,
            creation_time: stored.creation_time,
        }
    }

    /// The triplet addressing this record.
    pub fn triplet(&self) -> SchemaTriplet {
        SchemaTriplet::new(&self.namespace, &self.name, &self.version)
    }

    /// Short content fingerprint of the schema text.
    ///
    /// Base64 of the first 8 bytes of the SHA-256 digest. Two records with the same
    /// fingerprint almost certainly carry identical schema text.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.schema.as_bytes())
    }
}

impl HasTriplet for SchemaRecord {
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

/// Compute the content fingerprint of arbitrary bytes.
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let hash = hasher.finalize();
    BASE64.encode(&hash[..8])
}
