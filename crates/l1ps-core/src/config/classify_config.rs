//! Classification run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConfigError;
use crate::types::Prescale;

/// Which rows the classification run even considers. Applied as a pre-filter
/// before any pairwise evaluation begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// All rows.
    #[default]
    Inclusive,
    /// Only rows with prescale 1.
    Unprescaled,
    /// Only rows with prescale greater than 1.
    Prescaled,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inclusive => "inclusive",
            Self::Unprescaled => "unprescaled",
            Self::Prescaled => "prescaled",
        }
    }

    /// Whether a row with the given prescale passes this filter.
    pub fn retains(&self, prescale: Prescale) -> bool {
        match self {
            Self::Inclusive => true,
            Self::Unprescaled => prescale.get() == 1,
            Self::Prescaled => prescale.get() > 1,
        }
    }
}

/// Configuration for a classification run.
///
/// The active criteria list is part of the configuration so that a run's
/// criterion battery is recorded data rather than a code edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Require a backup candidate's prescale to be >= the signal seed's.
    pub check_prescales: bool,
    /// Keep rows with prescale 0 in the candidate set. Also allows a
    /// zero-prescale seed to be identified as a signal seed.
    pub keep_zero_prescales: bool,
    /// Row pre-filter.
    pub write_mode: WriteMode,
    /// Seeds always classified backup, bypassing evaluation.
    #[serde(default)]
    pub force_backup_seeds: Vec<String>,
    /// Skip the residual-equality check after segment stripping, widening
    /// matches across multi-attribute differences. Explicit opt-in.
    pub lazy: bool,
    /// Active criterion ids. Empty selects the full default battery.
    #[serde(default)]
    pub criteria: Vec<String>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            check_prescales: true,
            keep_zero_prescales: false,
            write_mode: WriteMode::Inclusive,
            force_backup_seeds: Vec::new(),
            lazy: false,
            criteria: Vec::new(),
        }
    }
}

impl ClassifyConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), "loaded classification config");
        Ok(config)
    }
}
