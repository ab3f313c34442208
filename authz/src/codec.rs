//! Conversion between permission descriptors and entity references.

use crate::error::{AuthzError, Result};
use crate::types::{Permission, PermissionDescriptor};
use entities::schema::{LOCATION_ARGUMENT, PROJECT_ARGUMENT, PROJECT_QUERY};
use entities::{
    registry, EntityType, NamedArguments, ParsedReference, SchemaEntry, UrlBuilder, UrlParser,
};
use tracing::debug;

/// Encode a descriptor into the permission the remote system stores.
///
/// `project` and `location` are lifted out of `entity_args`; every other
/// key must be a path argument declared for `entity_type`.
///
/// # Errors
///
/// - `UnknownEntityType` if `entity_type` is not registered
/// - `UnknownArgument` for an undeclared argument, or for a non-empty
///   `location` on an entity type without location support
/// - `MissingArgument` if a required path argument is absent or empty
/// - `ProjectRequired` / `ProjectNotAllowed` if the project argument does
///   not agree with the rendered reference
pub fn encode(
    entitlement: &str,
    entity_type: &str,
    entity_args: &NamedArguments,
) -> Result<Permission> {
    let schema = registry::lookup(entity_type)?;
    encode_with_schema(schema, entitlement, entity_args)
}

/// Decode a stored permission back into its descriptor.
///
/// Empty arguments are dropped, so a reference with `?target=` decodes the
/// same as one without. A project entity never reports a separate
/// `project` argument; its identity is already in `name`.
///
/// # Errors
///
/// - `UnknownEntityType` if `entity_type` is not registered
/// - `MalformedReference` if the reference does not parse, identifies a
///   different entity type than `entity_type`, or carries a non-empty
///   `project` or `target` the entity type does not accept
pub fn decode(
    entitlement: &str,
    entity_type: &str,
    entity_reference: &str,
) -> Result<PermissionDescriptor> {
    let expected: EntityType = entity_type.parse()?;
    let parsed = UrlParser::parse(entity_reference)?;

    if parsed.entity_type != expected {
        return Err(AuthzError::MalformedReference {
            reference: entity_reference.to_string(),
            reason: format!(
                "reference identifies entity type \"{}\", not \"{}\"",
                parsed.entity_type, expected
            ),
        });
    }

    debug!(
        "Decoded {} permission {:?} from {}",
        expected, entitlement, entity_reference
    );

    Ok(into_descriptor(expected.schema(), entitlement, parsed))
}

fn encode_with_schema(
    schema: &SchemaEntry,
    entitlement: &str,
    entity_args: &NamedArguments,
) -> Result<Permission> {
    let mut path_args = entity_args.clone();
    let project = path_args.remove(PROJECT_ARGUMENT).unwrap_or_default();
    let location = path_args.remove(LOCATION_ARGUMENT).unwrap_or_default();

    if let Some(unknown) = path_args.keys().find(|name| !schema.accepts_argument(name)) {
        return Err(AuthzError::UnknownArgument(unknown.clone()));
    }

    if !location.is_empty() && !schema.supports_location() {
        return Err(AuthzError::UnknownArgument(LOCATION_ARGUMENT.to_string()));
    }

    let url = UrlBuilder::build(schema, &path_args, &project, &location)?;

    // Whether a project is needed is read off the rendering so the two
    // cannot disagree.
    if project.is_empty() && url.has_query(PROJECT_QUERY) {
        return Err(AuthzError::ProjectRequired(schema.entity_type));
    }

    if !project.is_empty() && !url.has_query(PROJECT_QUERY) {
        return Err(AuthzError::ProjectNotAllowed(schema.entity_type));
    }

    let entity_reference = url.to_string();
    debug!(
        "Encoded {} permission {:?} as {}",
        schema.entity_type, entitlement, entity_reference
    );

    Ok(Permission {
        entitlement: entitlement.to_string(),
        entity_type: schema.entity_type.to_string(),
        entity_reference,
    })
}

fn into_descriptor(
    schema: &SchemaEntry,
    entitlement: &str,
    parsed: ParsedReference,
) -> PermissionDescriptor {
    let mut entity_args = parsed.path_args;

    if !schema.suppress_project_argument {
        entity_args.insert(PROJECT_ARGUMENT.to_string(), parsed.project);
    }
    entity_args.insert(LOCATION_ARGUMENT.to_string(), parsed.location);

    // Absent and empty are the same thing
    entity_args.retain(|_, value| !value.is_empty());

    PermissionDescriptor {
        entitlement: entitlement.to_string(),
        entity_type: parsed.entity_type.to_string(),
        entity_args,
    }
}

/// Encode descriptors in order, stopping at the first failure.
pub fn encode_all(descriptors: &[PermissionDescriptor]) -> Result<Vec<Permission>> {
    descriptors
        .iter()
        .map(PermissionDescriptor::to_permission)
        .collect()
}

/// Decode permissions in order, stopping at the first failure.
pub fn decode_all(permissions: &[Permission]) -> Result<Vec<PermissionDescriptor>> {
    permissions.iter().map(Permission::to_descriptor).collect()
}
