//! Phase setup and property errors.

use thiserror::Error;
use tt_core::TtError;
use tt_tables::TableError;

/// Result type for phase operations.
pub type PhaseResult<T> = Result<T, PhaseError>;

#[derive(Error, Debug)]
pub enum PhaseError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Core(#[from] TtError),

    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    #[error("Duplicate species: {name}")]
    DuplicateSpecies { name: String },

    #[error("Species index out of bounds: {index} (n_species={n_species})")]
    SpeciesOob { index: usize, n_species: usize },

    #[error("Composition length mismatch: expected {expected}, got {actual}")]
    CompositionLength { expected: usize, actual: usize },

    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PhaseError {
    /// True when setup failed because a composition table was malformed.
    pub fn is_invalid_table(&self) -> bool {
        matches!(self, PhaseError::Table(err) if err.is_invalid_table())
    }
}
