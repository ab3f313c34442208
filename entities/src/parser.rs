use crate::registry;
use crate::schema::{ProjectPolicy, SchemaEntry, Segment, API_ROOT, PROJECT_QUERY, TARGET_QUERY};
use crate::{EntitiesError, EntityType, NamedArguments, Result};
use tracing::trace;
use url::form_urlencoded;

/// Components recovered from an entity reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub entity_type: EntityType,
    /// Empty when the reference carries no project
    pub project: String,
    /// Taken from the `target` query parameter; empty when absent
    pub location: String,
    pub path_args: NamedArguments,
}

/// Parses entity references back into named arguments
pub struct UrlParser;

impl UrlParser {
    /// Parse a reference such as `/1.0/instances/c1?project=default`.
    ///
    /// The entity type is identified by the registered template the path
    /// matches. Only `project` and `target` are read from the query string;
    /// other parameters are ignored. A non-empty `project` or `target` that
    /// the matched entity type does not accept makes the reference malformed.
    pub fn parse(reference: &str) -> Result<ParsedReference> {
        let (path, query) = Self::split_reference(reference)?;
        let segments = Self::split_path(reference, path)?;

        let (schema, raw_args) = registry::entries()
            .iter()
            .find_map(|schema| Self::match_template(schema, &segments).map(|args| (schema, args)))
            .ok_or_else(|| {
                EntitiesError::malformed(reference, "does not match any known entity type")
            })?;

        trace!("Reference {:?} matched {}", reference, schema.entity_type);

        Self::assemble(reference, schema, raw_args, query)
    }

    /// Parse a reference against a single schema without consulting the
    /// registry.
    pub fn parse_with_schema(schema: &SchemaEntry, reference: &str) -> Result<ParsedReference> {
        let (path, query) = Self::split_reference(reference)?;
        let segments = Self::split_path(reference, path)?;

        let raw_args = Self::match_template(schema, &segments).ok_or_else(|| {
            EntitiesError::malformed(
                reference,
                format!("does not match template {}", schema.template_string()),
            )
        })?;

        Self::assemble(reference, schema, raw_args, query)
    }

    fn split_reference(reference: &str) -> Result<(&str, &str)> {
        if reference.contains('#') {
            return Err(EntitiesError::malformed(reference, "fragments are not allowed"));
        }

        Ok(reference.split_once('?').unwrap_or((reference, "")))
    }

    fn assemble(
        reference: &str,
        schema: &SchemaEntry,
        raw_args: Vec<(&'static str, &str)>,
        query: &str,
    ) -> Result<ParsedReference> {
        let mut path_args = NamedArguments::new();
        for (name, raw) in raw_args {
            let value = decode_segment(reference, raw)?;
            if value.is_empty() {
                return Err(EntitiesError::malformed(
                    reference,
                    format!("path argument {:?} is empty", name),
                ));
            }
            path_args.insert(name.to_string(), value);
        }

        let (mut project, location) = Self::parse_query(reference, query)?;

        // Non-empty query values must be ones the schema can render
        if !project.is_empty() && schema.project != ProjectPolicy::RequiredInQuery {
            return Err(EntitiesError::malformed(
                reference,
                format!(
                    "query parameter {:?} is not allowed for entity type \"{}\"",
                    PROJECT_QUERY, schema.entity_type
                ),
            ));
        }
        if !location.is_empty() && !schema.supports_location() {
            return Err(EntitiesError::malformed(
                reference,
                format!(
                    "query parameter {:?} is not allowed for entity type \"{}\"",
                    TARGET_QUERY, schema.entity_type
                ),
            ));
        }

        // A project entity carries its own name as its project
        if let ProjectPolicy::EmbeddedInPath { argument } = schema.project {
            if let Some(name) = path_args.get(argument) {
                project = name.clone();
            }
        }

        Ok(ParsedReference {
            entity_type: schema.entity_type,
            project,
            location,
            path_args,
        })
    }

    fn split_path<'a>(reference: &str, path: &'a str) -> Result<Vec<&'a str>> {
        let rest = path.strip_prefix(API_ROOT).ok_or_else(|| {
            EntitiesError::malformed(reference, format!("path must start with {:?}", API_ROOT))
        })?;

        if rest.is_empty() {
            return Ok(Vec::new());
        }

        let rest = rest.strip_prefix('/').ok_or_else(|| {
            EntitiesError::malformed(reference, format!("path must start with {:?}", API_ROOT))
        })?;

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(EntitiesError::malformed(reference, "empty path segment"));
        }

        Ok(segments)
    }

    /// Match raw path segments against a schema template, returning the
    /// still-encoded argument values on success
    fn match_template<'a>(
        schema: &SchemaEntry,
        segments: &[&'a str],
    ) -> Option<Vec<(&'static str, &'a str)>> {
        if segments.len() < schema.min_segments() || segments.len() > schema.template.len() {
            return None;
        }

        let mut args = Vec::with_capacity(segments.len());
        for (segment, value) in schema.template.iter().zip(segments) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Argument(name) => args.push((*name, *value)),
            }
        }

        Some(args)
    }

    /// Extract `project` and `target` from a query string. The first
    /// occurrence of a repeated key wins.
    fn parse_query(reference: &str, query: &str) -> Result<(String, String)> {
        if query.contains(';') {
            return Err(EntitiesError::malformed(
                reference,
                "invalid semicolon separator in query",
            ));
        }
        check_escapes(reference, query)?;

        let mut project: Option<String> = None;
        let mut location: Option<String> = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PROJECT_QUERY => {
                    project.get_or_insert_with(|| value.into_owned());
                }
                TARGET_QUERY => {
                    location.get_or_insert_with(|| value.into_owned());
                }
                other => trace!("Ignoring query parameter {:?} in {:?}", other, reference),
            }
        }

        Ok((project.unwrap_or_default(), location.unwrap_or_default()))
    }
}

/// Reject `%` not followed by two hex digits
fn check_escapes(reference: &str, raw: &str) -> Result<()> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(EntitiesError::malformed(
                    reference,
                    format!("invalid escape sequence in {:?}", raw),
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Percent-decode one path segment. Unlike query components, `+` is literal.
fn decode_segment(reference: &str, raw: &str) -> Result<String> {
    check_escapes(reference, raw)?;
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|e| EntitiesError::malformed(reference, format!("invalid UTF-8: {}", e)))
}
