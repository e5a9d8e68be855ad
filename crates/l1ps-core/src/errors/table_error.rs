//! Table structure errors.

use super::error_code::{self, ErrorCode};

/// Errors in the structure of an input table.
///
/// Column-identification failures are fatal configuration errors (spec:
/// identification must be unambiguous); they surface immediately with no
/// retry or recovery.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("no prescale column identified - check the table column names")]
    MissingPrescaleColumn,

    #[error("more than one prescale column identified: {candidates:?}")]
    AmbiguousPrescaleColumn { candidates: Vec<String> },

    #[error("no seed name column identified - make sure the seed names start with 'L1_'")]
    MissingNameColumn,

    #[error("seed name column is ambiguous between {candidates:?}")]
    AmbiguousNameColumn { candidates: Vec<String> },

    #[error("row has {got} cells but the table has {expected} columns")]
    RowArityMismatch { expected: usize, got: usize },

    #[error("unknown column: {name}")]
    UnknownColumn { name: String },
}

impl ErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPrescaleColumn | Self::MissingNameColumn => error_code::MISSING_COLUMN,
            Self::AmbiguousPrescaleColumn { .. } | Self::AmbiguousNameColumn { .. } => {
                error_code::AMBIGUOUS_COLUMN
            }
            _ => error_code::TABLE_ERROR,
        }
    }
}
