//! Entity reference schemas and the URL codec built on them.
//!
//! Every entity a permission can target is identified remotely by a
//! reference such as `/1.0/instances/c1?project=default`. The [`registry`]
//! describes, per [`EntityType`], which path arguments build that
//! reference and how `project` and `location` are carried. [`UrlBuilder`]
//! renders references and [`UrlParser`] inverts the rendering.

pub mod builder;
pub mod entity_type;
pub mod error;
pub mod parser;
pub mod registry;
pub mod schema;

use std::collections::BTreeMap;

pub use builder::{EntityUrl, UrlBuilder};
pub use entity_type::EntityType;
pub use error::{EntitiesError, Result};
pub use parser::{ParsedReference, UrlParser};
pub use schema::{LocationPolicy, ProjectPolicy, SchemaEntry, Segment};

/// Named arguments of an entity reference, keyed by argument name
pub type NamedArguments = BTreeMap<String, String>;
