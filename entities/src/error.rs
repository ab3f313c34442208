use thiserror::Error;

pub type Result<T> = std::result::Result<T, EntitiesError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntitiesError {
    #[error("Unknown entity type {0:?}")]
    UnknownEntityType(String),

    #[error("Missing path argument {0:?}")]
    MissingArgument(String),

    #[error("Invalid entity reference {reference:?}: {reason}")]
    MalformedReference { reference: String, reason: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

impl EntitiesError {
    pub(crate) fn malformed(reference: &str, reason: impl Into<String>) -> Self {
        EntitiesError::MalformedReference {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}
