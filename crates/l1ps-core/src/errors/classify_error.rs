//! Top-level classification error.

use super::config_error::ConfigError;
use super::error_code::ErrorCode;
use super::table_error::TableError;

/// Any fatal error a classification or regeneration run can surface.
///
/// Non-fatal conditions (ungrammatical seed names, unparsable prescale
/// cells, regeneration lookup misses) never appear here; they are logged and
/// recorded in the run's outputs while processing continues.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ErrorCode for ClassifyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Table(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
