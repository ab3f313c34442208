//! Permission types exchanged with the remote authorization API.
//!
//! A [`PermissionDescriptor`] is the human-authored form: an entitlement,
//! an entity type tag and the named arguments that locate the entity. A
//! [`Permission`] is the form the remote system stores, where the entity is
//! identified by a canonical reference URL. [`AuthGroup`] and
//! [`AuthGroupRecord`] are the same pairing for a whole group.

use crate::codec;
use crate::error::Result;
use entities::NamedArguments;
use serde::{Deserialize, Serialize};

/// A permission as stored by the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Capability granted, e.g. "can_view"
    pub entitlement: String,

    /// Entity type tag, e.g. "instance"
    pub entity_type: String,

    /// Canonical reference of the target entity, e.g. "/1.0/instances/c1?project=default"
    pub entity_reference: String,
}

impl Permission {
    pub fn new(
        entitlement: impl Into<String>,
        entity_type: impl Into<String>,
        entity_reference: impl Into<String>,
    ) -> Self {
        Self {
            entitlement: entitlement.into(),
            entity_type: entity_type.into(),
            entity_reference: entity_reference.into(),
        }
    }

    /// Reconstruct the descriptor this permission was encoded from.
    pub fn to_descriptor(&self) -> Result<PermissionDescriptor> {
        codec::decode(&self.entitlement, &self.entity_type, &self.entity_reference)
    }
}

/// A permission in its decomposed, human-meaningful form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    pub entitlement: String,

    pub entity_type: String,

    /// Path arguments plus the reserved `project` and `location` keys
    #[serde(default)]
    pub entity_args: NamedArguments,
}

impl PermissionDescriptor {
    /// Creates a descriptor with no arguments.
    pub fn new(entitlement: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            entitlement: entitlement.into(),
            entity_type: entity_type.into(),
            entity_args: NamedArguments::new(),
        }
    }

    /// Set a named argument
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entity_args.insert(name.into(), value.into());
        self
    }

    /// Encode into the remote representation.
    pub fn to_permission(&self) -> Result<Permission> {
        codec::encode(&self.entitlement, &self.entity_type, &self.entity_args)
    }
}

/// An auth group with permissions in descriptor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGroup {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub permissions: Vec<PermissionDescriptor>,
}

/// An auth group as stored by the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthGroupRecord {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl AuthGroup {
    /// Encode every permission of the group. Stops at the first permission
    /// that fails to encode.
    pub fn to_record(&self) -> Result<AuthGroupRecord> {
        Ok(AuthGroupRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            permissions: codec::encode_all(&self.permissions)?,
        })
    }

    /// Decode a group retrieved from the remote system. Stops at the first
    /// permission that fails to decode.
    pub fn from_record(record: &AuthGroupRecord) -> Result<Self> {
        Ok(Self {
            name: record.name.clone(),
            description: record.description.clone(),
            permissions: codec::decode_all(&record.permissions)?,
        })
    }
}
