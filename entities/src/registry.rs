//! Static catalogue of entity reference schemas.
//!
//! Entries are stored in [`EntityType::ALL`] order so lookups by entity type
//! are a plain index. The table is immutable and needs no locking.

use crate::schema::{LocationPolicy, ProjectPolicy, SchemaEntry, Segment};
use crate::{EntityType, Result};
use Segment::{Argument, Literal};

const fn global(
    entity_type: EntityType,
    required: &'static [&'static str],
    template: &'static [Segment],
) -> SchemaEntry {
    SchemaEntry {
        entity_type,
        required,
        optional: &[],
        template,
        project: ProjectPolicy::Forbidden,
        location: LocationPolicy::NotSupported,
        suppress_project_argument: false,
    }
}

const fn project_scoped(
    entity_type: EntityType,
    required: &'static [&'static str],
    template: &'static [Segment],
) -> SchemaEntry {
    SchemaEntry {
        entity_type,
        required,
        optional: &[],
        template,
        project: ProjectPolicy::RequiredInQuery,
        location: LocationPolicy::NotSupported,
        suppress_project_argument: false,
    }
}

const fn located(
    entity_type: EntityType,
    required: &'static [&'static str],
    template: &'static [Segment],
) -> SchemaEntry {
    SchemaEntry {
        entity_type,
        required,
        optional: &[],
        template,
        project: ProjectPolicy::RequiredInQuery,
        location: LocationPolicy::OptionalInQuery,
        suppress_project_argument: false,
    }
}

static REGISTRY: [SchemaEntry; 25] = [
    global(EntityType::Server, &[], &[]),
    SchemaEntry {
        entity_type: EntityType::Project,
        required: &["name"],
        optional: &[],
        template: &[Literal("projects"), Argument("name")],
        project: ProjectPolicy::EmbeddedInPath { argument: "name" },
        location: LocationPolicy::NotSupported,
        suppress_project_argument: true,
    },
    global(
        EntityType::Certificate,
        &["fingerprint"],
        &[Literal("certificates"), Argument("fingerprint")],
    ),
    global(
        EntityType::ClusterGroup,
        &["name"],
        &[Literal("cluster"), Literal("groups"), Argument("name")],
    ),
    global(
        EntityType::ClusterMember,
        &["name"],
        &[Literal("cluster"), Literal("members"), Argument("name")],
    ),
    global(
        EntityType::AuthGroup,
        &["name"],
        &[Literal("auth"), Literal("groups"), Argument("name")],
    ),
    global(
        EntityType::IdentityProviderGroup,
        &["name"],
        &[
            Literal("auth"),
            Literal("identity-provider-groups"),
            Argument("name"),
        ],
    ),
    global(
        EntityType::Identity,
        &["authentication_method", "name"],
        &[
            Literal("auth"),
            Literal("identities"),
            Argument("authentication_method"),
            Argument("name"),
        ],
    ),
    global(
        EntityType::StoragePool,
        &["name"],
        &[Literal("storage-pools"), Argument("name")],
    ),
    global(
        EntityType::Warning,
        &["id"],
        &[Literal("warnings"), Argument("id")],
    ),
    global(
        EntityType::Operation,
        &["id"],
        &[Literal("operations"), Argument("id")],
    ),
    project_scoped(
        EntityType::Container,
        &["name"],
        &[Literal("containers"), Argument("name")],
    ),
    project_scoped(
        EntityType::Image,
        &["fingerprint"],
        &[Literal("images"), Argument("fingerprint")],
    ),
    project_scoped(
        EntityType::ImageAlias,
        &["name"],
        &[Literal("images"), Literal("aliases"), Argument("name")],
    ),
    project_scoped(
        EntityType::Instance,
        &["name"],
        &[Literal("instances"), Argument("name")],
    ),
    project_scoped(
        EntityType::InstanceBackup,
        &["instance", "name"],
        &[
            Literal("instances"),
            Argument("instance"),
            Literal("backups"),
            Argument("name"),
        ],
    ),
    project_scoped(
        EntityType::InstanceSnapshot,
        &["instance", "name"],
        &[
            Literal("instances"),
            Argument("instance"),
            Literal("snapshots"),
            Argument("name"),
        ],
    ),
    project_scoped(
        EntityType::Network,
        &["name"],
        &[Literal("networks"), Argument("name")],
    ),
    project_scoped(
        EntityType::NetworkAcl,
        &["name"],
        &[Literal("network-acls"), Argument("name")],
    ),
    project_scoped(
        EntityType::NetworkZone,
        &["name"],
        &[Literal("network-zones"), Argument("name")],
    ),
    project_scoped(
        EntityType::Profile,
        &["name"],
        &[Literal("profiles"), Argument("name")],
    ),
    located(
        EntityType::StorageVolume,
        &["pool", "type", "name"],
        &[
            Literal("storage-pools"),
            Argument("pool"),
            Literal("volumes"),
            Argument("type"),
            Argument("name"),
        ],
    ),
    located(
        EntityType::StorageVolumeBackup,
        &["pool", "type", "volume", "name"],
        &[
            Literal("storage-pools"),
            Argument("pool"),
            Literal("volumes"),
            Argument("type"),
            Argument("volume"),
            Literal("backups"),
            Argument("name"),
        ],
    ),
    located(
        EntityType::StorageVolumeSnapshot,
        &["pool", "type", "volume", "name"],
        &[
            Literal("storage-pools"),
            Argument("pool"),
            Literal("volumes"),
            Argument("type"),
            Argument("volume"),
            Literal("snapshots"),
            Argument("name"),
        ],
    ),
    located(
        EntityType::StorageBucket,
        &["pool", "name"],
        &[
            Literal("storage-pools"),
            Argument("pool"),
            Literal("buckets"),
            Argument("name"),
        ],
    ),
];

/// All registered schemas, in [`EntityType::ALL`] order
pub fn entries() -> &'static [SchemaEntry] {
    &REGISTRY
}

/// Resolve the schema for an entity type tag
pub fn lookup(tag: &str) -> Result<&'static SchemaEntry> {
    let entity_type: EntityType = tag.parse()?;
    Ok(entity_type.schema())
}

impl EntityType {
    /// The registered reference schema for this entity type
    pub fn schema(&self) -> &'static SchemaEntry {
        &REGISTRY[*self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntitiesError;

    #[test]
    fn test_registry_order_matches_entity_types() {
        assert_eq!(entries().len(), EntityType::ALL.len());
        for (entry, entity_type) in entries().iter().zip(EntityType::ALL) {
            assert_eq!(entry.entity_type, entity_type);
            assert_eq!(entity_type.schema().entity_type, entity_type);
        }
    }

    #[test]
    fn test_every_entry_is_valid() {
        for entry in entries() {
            entry
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", entry.entity_type, e));
        }
    }

    #[test]
    fn test_lookup() {
        let schema = lookup("storage_volume").unwrap();
        assert_eq!(
            schema.template_string(),
            "/1.0/storage-pools/{pool}/volumes/{type}/{name}"
        );
        assert_eq!(schema.required, &["pool", "type", "name"]);
        assert!(schema.supports_location());

        assert_eq!(lookup("server").unwrap().template_string(), "/1.0");

        let err = lookup("nope").unwrap_err();
        assert_eq!(err, EntitiesError::UnknownEntityType("nope".to_string()));
    }

    #[test]
    fn test_project_policies() {
        assert_eq!(
            EntityType::Project.schema().project,
            ProjectPolicy::EmbeddedInPath { argument: "name" }
        );
        assert!(EntityType::Project.schema().suppress_project_argument);
        assert_eq!(
            EntityType::Instance.schema().project,
            ProjectPolicy::RequiredInQuery
        );
        assert_eq!(EntityType::Server.schema().project, ProjectPolicy::Forbidden);
        assert!(entries()
            .iter()
            .filter(|entry| entry.suppress_project_argument)
            .all(|entry| entry.entity_type == EntityType::Project));
    }
}
