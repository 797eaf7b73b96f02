//! CLI error types.

use ddic_core::EntityKind;
use thiserror::Error;

/// Errors surfaced by `ddic` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the dictionary core.
    #[error(transparent)]
    Core(#[from] ddic_core::Error),

    /// The named entity is not registered in the loaded catalog.
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    /// Invalid invocation or environment.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CliError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        CliError::NotFound {
            kind,
            name: name.into(),
        }
    }
}
