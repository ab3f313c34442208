//! Error types for permission conversion.
//!
//! # Propagation
//! Every error is terminal for the conversion that raised it. Conversions
//! are deterministic, so retrying with the same input fails the same way.
//! Batch conversions and auth-group conversions return the error of the
//! first element that failed and discard everything after it.
//!
//! # Messages
//! Messages name the offending argument, entity type or reference and are
//! meant to be shown to the operator as they are. They never repeat the
//! other arguments of the descriptor being converted.
//!
//! Errors raised by the `entities` crate while rendering or parsing a
//! reference are mapped variant for variant through `From<EntitiesError>`,
//! so `?` can be used across the crate boundary.

use entities::{EntitiesError, EntityType};
use thiserror::Error;

/// Errors that can occur while converting permissions.
///
/// # Caller guidance
/// - `UnknownEntityType`, `UnknownArgument`, `MissingArgument` and the two
///   project variants describe a bad descriptor and are fixed by the author
///   of the permission
/// - `MalformedReference` describes a record retrieved from the remote
///   system that cannot be represented as a descriptor
/// - `InvalidSchema` points at the registry itself and is never caused by
///   caller input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The entity type is not in the registry.
    #[error("Unknown entity type {0:?}")]
    UnknownEntityType(String),

    /// A required path argument was absent or empty.
    #[error("Missing path argument {0:?}")]
    MissingArgument(String),

    /// An argument the entity type does not declare was supplied.
    #[error("Unknown path argument {0:?}")]
    UnknownArgument(String),

    /// The entity type is project scoped but no project was given.
    #[error("Permission argument \"project\" is required for permission with entity type \"{0}\"")]
    ProjectRequired(EntityType),

    /// A project was given for an entity type that is not project scoped.
    #[error(
        "Permission argument \"project\" is not allowed for permission with entity type \"{0}\""
    )]
    ProjectNotAllowed(EntityType),

    /// An entity reference could not be parsed, or carries a query
    /// parameter its entity type does not accept.
    #[error("Invalid entity reference {reference:?}: {reason}")]
    MalformedReference { reference: String, reason: String },

    /// A registry entry is internally inconsistent.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

/// A specialized Result type for permission conversion.
pub type Result<T> = std::result::Result<T, AuthzError>;

impl From<EntitiesError> for AuthzError {
    fn from(err: EntitiesError) -> Self {
        match err {
            EntitiesError::UnknownEntityType(tag) => AuthzError::UnknownEntityType(tag),
            EntitiesError::MissingArgument(name) => AuthzError::MissingArgument(name),
            EntitiesError::MalformedReference { reference, reason } => {
                AuthzError::MalformedReference { reference, reason }
            }
            EntitiesError::InvalidSchema(message) => AuthzError::InvalidSchema(message),
        }
    }
}
