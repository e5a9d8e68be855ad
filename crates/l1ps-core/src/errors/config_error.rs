//! Configuration errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors loading or validating a run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("unknown criterion id: {name}")]
    UnknownCriterion { name: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCriterion { .. } => error_code::UNKNOWN_CRITERION,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
