//! Table construction and evaluation errors.

use thiserror::Error;
use tt_core::TtError;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building or evaluating composition tables.
#[derive(Error, Debug)]
pub enum TableError {
    /// Malformed or undersized table data. Fatal to phase setup.
    #[error("Invalid table: {reason}")]
    InvalidTable { reason: String },

    /// Zero-width interpolation bracket. Only reachable if table invariants were bypassed.
    #[error("Internal consistency error: {what}")]
    InternalConsistency { what: &'static str },

    /// Query composition is NaN or infinite.
    #[error("Non-finite composition query: {value}")]
    NonFiniteQuery { value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            reason: reason.into(),
        }
    }

    /// Prefix an [`TableError::InvalidTable`] reason with the table it came from.
    pub(crate) fn in_table(self, name: &str) -> Self {
        match self {
            Self::InvalidTable { reason } => Self::InvalidTable {
                reason: format!("{name} table: {reason}"),
            },
            other => other,
        }
    }

    /// True for errors caused by bad input data rather than I/O or logic faults.
    pub fn is_invalid_table(&self) -> bool {
        matches!(self, Self::InvalidTable { .. })
    }
}

impl From<TableError> for TtError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::InvalidTable { .. } => TtError::InvalidArg {
                what: "invalid composition table",
            },
            TableError::InternalConsistency { what } => TtError::Invariant { what },
            TableError::NonFiniteQuery { value } => TtError::NonFinite {
                what: "composition query",
                value,
            },
            TableError::Io(_) => TtError::InvalidArg {
                what: "table source could not be read",
            },
        }
    }
}
