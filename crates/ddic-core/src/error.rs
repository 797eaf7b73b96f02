//! Core error types.

use crate::catalog::EntityKind;
use thiserror::Error;

/// Data dictionary errors.
///
/// Consistency problems between registered entities are not errors; the
/// validator reports them as findings.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed construction or operation input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An entity of the same kind is already registered under this name.
    #[error("{kind} already registered: {name}")]
    DuplicateName {
        /// Kind of the rejected entity.
        kind: EntityKind,
        /// The conflicting name.
        name: String,
    },

    /// A snapshot refers to an entity that has not been registered.
    #[error("{kind} not found: {name}")]
    UnresolvedReference {
        /// Kind of the missing referent.
        kind: EntityKind,
        /// Name that failed to resolve.
        name: String,
    },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type for data dictionary operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
