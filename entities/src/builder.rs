use crate::schema::{ProjectPolicy, SchemaEntry, Segment, API_ROOT, PROJECT_QUERY, TARGET_QUERY};
use crate::{EntitiesError, NamedArguments, Result};
use std::fmt;
use tracing::trace;

/// A rendered entity reference
///
/// Keeps the query parameters apart from the path so callers can inspect
/// what the rendering produced before serialising it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityUrl {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl EntityUrl {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check whether the rendered query string carries `key`, even with an empty value
    pub fn has_query(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| *k == key)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for EntityUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", separator, key, urlencoding::encode(value))?;
        }
        Ok(())
    }
}

/// Renders entity references from a schema and named path arguments
pub struct UrlBuilder;

impl UrlBuilder {
    /// Render the reference for `schema`.
    ///
    /// Path arguments are substituted in template order; keys the schema does
    /// not declare are ignored. Project scoped schemas always render a
    /// `project` query parameter, even when `project` is empty, and a
    /// non-empty `location` is rendered as `target`. Project policy is not
    /// enforced here.
    pub fn build(
        schema: &SchemaEntry,
        path_args: &NamedArguments,
        project: &str,
        location: &str,
    ) -> Result<EntityUrl> {
        let mut path = String::from(API_ROOT);
        let mut omitted: Option<&str> = None;

        for segment in schema.template {
            match segment {
                Segment::Literal(literal) => {
                    path.push('/');
                    path.push_str(literal);
                }
                Segment::Argument(name) => {
                    let value = path_args.get(*name).map(String::as_str).unwrap_or("");
                    if value.is_empty() {
                        if schema.is_optional(name) {
                            omitted.get_or_insert(*name);
                            continue;
                        }
                        return Err(EntitiesError::MissingArgument(name.to_string()));
                    }

                    // A later segment cannot be placed once an earlier optional one is absent
                    if let Some(gap) = omitted {
                        return Err(EntitiesError::MissingArgument(gap.to_string()));
                    }

                    path.push('/');
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }

        let mut query = Vec::new();
        if schema.project == ProjectPolicy::RequiredInQuery {
            query.push((PROJECT_QUERY, project.to_string()));
        }
        if !location.is_empty() {
            query.push((TARGET_QUERY, location.to_string()));
        }

        let url = EntityUrl { path, query };
        trace!("Rendered {} reference: {}", schema.entity_type, url);

        Ok(url)
    }
}
