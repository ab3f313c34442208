//! Permission entity-reference codec.
//!
//! Permissions are written by people as an entitlement, an entity type and
//! a map of named arguments:
//!
//! ```text
//! entitlement = "can_view"
//! entity_type = "storage_volume"
//! entity_args = { name = "vol1", pool = "pool1", type = "custom", project = "default" }
//! ```
//!
//! The remote authorization API stores the same permission with the entity
//! identified by a canonical reference:
//!
//! ```text
//! /1.0/storage-pools/pool1/volumes/custom/vol1?project=default
//! ```
//!
//! This crate converts between the two forms, validating the arguments
//! against the entity type's schema from the `entities` registry.
//! Conversions are pure: no I/O, no caching and no shared mutable state, so
//! they may be called from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use authz::PermissionDescriptor;
//!
//! let descriptor = PermissionDescriptor::new("can_view", "instance")
//!     .with_arg("name", "c1")
//!     .with_arg("project", "myproj");
//!
//! let permission = descriptor.to_permission().unwrap();
//! assert_eq!(permission.entity_reference, "/1.0/instances/c1?project=myproj");
//!
//! assert_eq!(permission.to_descriptor().unwrap(), descriptor);
//! ```

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{decode, decode_all, encode, encode_all};
pub use entities::{EntityType, NamedArguments};
pub use error::{AuthzError, Result};
pub use types::{AuthGroup, AuthGroupRecord, Permission, PermissionDescriptor};
