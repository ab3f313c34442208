use crate::{EntitiesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity types a permission can target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Server,
    Project,
    Certificate,
    ClusterGroup,
    ClusterMember,
    AuthGroup,
    IdentityProviderGroup,
    Identity,
    StoragePool,
    Warning,
    Operation,
    Container,
    Image,
    ImageAlias,
    Instance,
    InstanceBackup,
    InstanceSnapshot,
    Network,
    NetworkAcl,
    NetworkZone,
    Profile,
    StorageVolume,
    StorageVolumeBackup,
    StorageVolumeSnapshot,
    StorageBucket,
}

impl EntityType {
    /// Every entity type, in registry order
    pub const ALL: [EntityType; 25] = [
        EntityType::Server,
        EntityType::Project,
        EntityType::Certificate,
        EntityType::ClusterGroup,
        EntityType::ClusterMember,
        EntityType::AuthGroup,
        EntityType::IdentityProviderGroup,
        EntityType::Identity,
        EntityType::StoragePool,
        EntityType::Warning,
        EntityType::Operation,
        EntityType::Container,
        EntityType::Image,
        EntityType::ImageAlias,
        EntityType::Instance,
        EntityType::InstanceBackup,
        EntityType::InstanceSnapshot,
        EntityType::Network,
        EntityType::NetworkAcl,
        EntityType::NetworkZone,
        EntityType::Profile,
        EntityType::StorageVolume,
        EntityType::StorageVolumeBackup,
        EntityType::StorageVolumeSnapshot,
        EntityType::StorageBucket,
    ];

    /// The tag used in permission records
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Server => "server",
            EntityType::Project => "project",
            EntityType::Certificate => "certificate",
            EntityType::ClusterGroup => "cluster_group",
            EntityType::ClusterMember => "cluster_member",
            EntityType::AuthGroup => "auth_group",
            EntityType::IdentityProviderGroup => "identity_provider_group",
            EntityType::Identity => "identity",
            EntityType::StoragePool => "storage_pool",
            EntityType::Warning => "warning",
            EntityType::Operation => "operation",
            EntityType::Container => "container",
            EntityType::Image => "image",
            EntityType::ImageAlias => "image_alias",
            EntityType::Instance => "instance",
            EntityType::InstanceBackup => "instance_backup",
            EntityType::InstanceSnapshot => "instance_snapshot",
            EntityType::Network => "network",
            EntityType::NetworkAcl => "network_acl",
            EntityType::NetworkZone => "network_zone",
            EntityType::Profile => "profile",
            EntityType::StorageVolume => "storage_volume",
            EntityType::StorageVolumeBackup => "storage_volume_backup",
            EntityType::StorageVolumeSnapshot => "storage_volume_snapshot",
            EntityType::StorageBucket => "storage_bucket",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = EntitiesError;

    fn from_str(s: &str) -> Result<Self> {
        EntityType::ALL
            .iter()
            .copied()
            .find(|entity_type| entity_type.as_str() == s)
            .ok_or_else(|| EntitiesError::UnknownEntityType(s.to_string()))
    }
}
