//! The audit decision log.
//!
//! Every classified seed gets an entry with full provenance: which signal
//! seeds it backs up, through which criteria. The log also echoes the run
//! configuration so a classification is reproducible from its log alone.

use l1ps_core::config::ClassifyConfig;
use l1ps_core::errors::TableError;
use l1ps_core::types::{CellValue, Prescale, PrescaleTable};
use serde::Serialize;

/// Provenance sentinel for seeds classified backup via the force list.
pub const FORCED_PROVENANCE: &str = "manually forced";

/// One identified signal seed, with its prescale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalSeed {
    pub name: String,
    pub prescale: Prescale,
}

/// The decision for one classified seed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionEntry {
    pub seed: String,
    pub prescale: Prescale,
    pub is_backup: bool,
    pub forced: bool,
    /// Identified signal seeds, deduplicated, in evaluation order.
    pub signals: Vec<SignalSeed>,
    /// Names of the criteria that flagged this seed, deduplicated.
    pub criteria: Vec<&'static str>,
}

/// The decision log of one classification run.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionLog {
    /// The run configuration, echoed for reproducibility.
    pub config: ClassifyConfig,
    /// The resolved active criterion battery.
    pub active_criteria: Vec<&'static str>,
    /// One entry per classified seed, in input row order.
    pub entries: Vec<DecisionEntry>,
}

impl DecisionLog {
    /// Render the log as a four-column table for the reporting layer.
    pub fn to_table(&self) -> Result<PrescaleTable, TableError> {
        let mut table = PrescaleTable::new(vec![
            "seed".to_string(),
            "prescale".to_string(),
            "signal seeds".to_string(),
            "criteria".to_string(),
        ]);
        for entry in &self.entries {
            let signals = entry
                .signals
                .iter()
                .map(|s| format!("{} (PS: {})", s.name, s.prescale))
                .collect::<Vec<_>>()
                .join(", ");
            let criteria = entry.criteria.join(", ");
            table.push_row(vec![
                CellValue::from(entry.seed.as_str()),
                CellValue::from(entry.prescale.get()),
                CellValue::from(signals),
                CellValue::from(criteria),
            ])?;
        }
        Ok(table)
    }

    /// Entries classified backup.
    pub fn backups(&self) -> impl Iterator<Item = &DecisionEntry> {
        self.entries.iter().filter(|e| e.is_backup)
    }
}
