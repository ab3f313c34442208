use crate::{EntitiesError, EntityType, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Fixed root of every entity reference
pub const API_ROOT: &str = "/1.0";

/// Argument names lifted out of the path and carried in the query string
pub const PROJECT_ARGUMENT: &str = "project";
pub const LOCATION_ARGUMENT: &str = "location";

/// Query parameter names as they appear in entity references
pub const PROJECT_QUERY: &str = "project";
pub const TARGET_QUERY: &str = "target";

/// One segment of a path template below [`API_ROOT`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Must appear verbatim
    Literal(&'static str),
    /// Bound to the named path argument
    Argument(&'static str),
}

/// How an entity type treats the `project` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPolicy {
    /// The entity is not project scoped
    Forbidden,
    /// The entity is project scoped and the reference always carries `?project=`
    RequiredInQuery,
    /// The entity is a project; the named path argument is its identity
    EmbeddedInPath { argument: &'static str },
}

impl fmt::Display for ProjectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectPolicy::Forbidden => f.write_str("forbidden"),
            ProjectPolicy::RequiredInQuery => f.write_str("required in query"),
            ProjectPolicy::EmbeddedInPath { argument } => {
                write!(f, "embedded in path as {:?}", argument)
            }
        }
    }
}

/// Whether an entity type accepts a `location` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPolicy {
    NotSupported,
    /// Rendered as `?target=` when non-empty
    OptionalInQuery,
}

impl fmt::Display for LocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationPolicy::NotSupported => f.write_str("not supported"),
            LocationPolicy::OptionalInQuery => f.write_str("optional in query"),
        }
    }
}

/// Reference schema of a single entity type
///
/// The placeholders of `template` are bound, in order, to `required`
/// followed by `optional`. Optional placeholders are always trailing so a
/// reference that omits them is still unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    pub entity_type: EntityType,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub template: &'static [Segment],
    pub project: ProjectPolicy,
    pub location: LocationPolicy,
    /// Decoding never reports a separate `project` argument for this type
    pub suppress_project_argument: bool,
}

impl SchemaEntry {
    /// All declared path argument names, required first
    pub fn path_arguments(&self) -> impl Iterator<Item = &'static str> {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    /// Check whether `name` is a declared path argument
    pub fn accepts_argument(&self, name: &str) -> bool {
        self.path_arguments().any(|argument| argument == name)
    }

    /// Check whether `name` is a declared optional path argument
    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.contains(&name)
    }

    pub fn supports_location(&self) -> bool {
        self.location == LocationPolicy::OptionalInQuery
    }

    /// Number of template segments that must always be present
    pub fn min_segments(&self) -> usize {
        self.template.len() - self.optional.len()
    }

    /// Human readable template, e.g. `/1.0/instances/{name}`
    pub fn template_string(&self) -> String {
        let mut out = String::from(API_ROOT);
        for segment in self.template {
            out.push('/');
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Argument(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
        }
        out
    }

    /// Validate the internal consistency of this entry
    pub fn validate(&self) -> Result<()> {
        let entity_type = self.entity_type;

        // Placeholder order must match the declared argument order
        let placeholders: Vec<&str> = self
            .template
            .iter()
            .filter_map(|segment| match segment {
                Segment::Argument(name) => Some(*name),
                Segment::Literal(_) => None,
            })
            .collect();
        let declared: Vec<&str> = self.path_arguments().collect();
        if placeholders != declared {
            return Err(EntitiesError::InvalidSchema(format!(
                "Entity type '{}' template placeholders {:?} do not match declared arguments {:?}",
                entity_type, placeholders, declared
            )));
        }

        let mut seen = HashSet::new();
        for name in &declared {
            if name.is_empty() {
                return Err(EntitiesError::InvalidSchema(format!(
                    "Entity type '{}' declares an empty argument name",
                    entity_type
                )));
            }
            if *name == PROJECT_ARGUMENT || *name == LOCATION_ARGUMENT {
                return Err(EntitiesError::InvalidSchema(format!(
                    "Entity type '{}' declares reserved argument '{}' as a path argument",
                    entity_type, name
                )));
            }
            if !seen.insert(*name) {
                return Err(EntitiesError::InvalidSchema(format!(
                    "Entity type '{}' declares argument '{}' twice",
                    entity_type, name
                )));
            }
        }

        // Optional placeholders form the tail of the template
        let tail = &self.template[self.min_segments()..];
        if tail
            .iter()
            .any(|segment| !matches!(segment, Segment::Argument(_)))
        {
            return Err(EntitiesError::InvalidSchema(format!(
                "Entity type '{}' has literal segments after an optional argument",
                entity_type
            )));
        }

        for segment in self.template {
            if let Segment::Literal(literal) = segment {
                if literal.is_empty() || literal.contains('/') {
                    return Err(EntitiesError::InvalidSchema(format!(
                        "Entity type '{}' has invalid literal segment {:?}",
                        entity_type, literal
                    )));
                }
            }
        }

        match self.project {
            ProjectPolicy::EmbeddedInPath { argument } => {
                if !self.required.contains(&argument) {
                    return Err(EntitiesError::InvalidSchema(format!(
                        "Entity type '{}' embeds its project in undeclared argument '{}'",
                        entity_type, argument
                    )));
                }
            }
            _ if self.suppress_project_argument => {
                return Err(EntitiesError::InvalidSchema(format!(
                    "Entity type '{}' suppresses a project argument it does not embed",
                    entity_type
                )));
            }
            _ => {}
        }

        Ok(())
    }
}
