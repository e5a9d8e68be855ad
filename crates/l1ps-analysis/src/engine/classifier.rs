//! Pairwise backup-seed classification.
//!
//! Every candidate row is evaluated against every other retained row through
//! every active criterion. A seed is a backup as soon as one criterion says
//! so; all flagging criteria and all identified signal seeds are recorded.
//! The outer loop is parallel; results are collected in input row order, so
//! identical inputs always produce identical outputs.

use l1ps_core::config::ClassifyConfig;
use l1ps_core::errors::ClassifyError;
use l1ps_core::types::{CellValue, Prescale, PrescaleTable};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assemble::partition;
use crate::criteria::{self, Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};
use crate::seed::basename::is_valid_seed;

use super::decision_log::{DecisionEntry, DecisionLog, SignalSeed, FORCED_PROVENANCE};

/// Why a row was left out of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The name cell does not satisfy the seed grammar.
    InvalidSeedName,
    /// The prescale cell could not be parsed.
    UnparsablePrescale,
    /// The row was removed by the write-mode pre-filter.
    WriteModeFiltered,
    /// Prescale 0 while zero-prescale rows are not retained.
    ZeroPrescale,
}

/// A row excluded from classification, with the reason. Skips are logged,
/// never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub seed: Option<String>,
    pub reason: SkipReason,
}

/// One criterion flagging one signal seed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupMatch {
    pub signal: String,
    pub signal_prescale: Prescale,
    pub criterion: CriterionKind,
}

/// The verdict for one candidate row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDecision {
    pub row: usize,
    pub seed: String,
    pub prescale: Prescale,
    pub forced: bool,
    pub matches: Vec<BackupMatch>,
}

impl RowDecision {
    pub fn is_backup(&self) -> bool {
        self.forced || !self.matches.is_empty()
    }
}

/// Everything a classification run produces.
#[derive(Debug)]
pub struct Classification {
    /// Rows not identified as backups, input schema preserved.
    pub signal: PrescaleTable,
    /// Rows identified as backups.
    pub backup: PrescaleTable,
    /// Full per-seed provenance.
    pub log: DecisionLog,
    /// Rows that were never considered.
    pub skipped: Vec<SkippedRow>,
}

struct Candidate<'t> {
    row: usize,
    name: &'t str,
    prescale: Prescale,
}

/// The classification engine: a configured criterion battery over a table.
pub struct Classifier {
    config: ClassifyConfig,
    criteria: Vec<Box<dyn Criterion>>,
}

impl Classifier {
    /// Build a classifier from a run configuration. Unknown criterion ids in
    /// the config are rejected here, before any table is touched.
    pub fn new(config: ClassifyConfig) -> Result<Self, ClassifyError> {
        let criteria = criteria::battery_from_ids(&config.criteria)?;
        Ok(Self { config, criteria })
    }

    /// A classifier with the default configuration and the full battery.
    pub fn with_defaults() -> Self {
        Self {
            config: ClassifyConfig::default(),
            criteria: criteria::default_battery(),
        }
    }

    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    /// Ids of the active criteria, in evaluation order.
    pub fn active_criteria(&self) -> Vec<&'static str> {
        self.criteria.iter().map(|c| c.id()).collect()
    }

    /// Partition a table into signal and backup rows.
    pub fn classify(&self, table: &PrescaleTable) -> Result<Classification, ClassifyError> {
        let name_col = table.name_column()?;
        let ps_col = table.prescale_column()?;

        // Reference pool: rows with a grammatical name and a readable
        // prescale that pass the write-mode pre-filter. Zero-prescale rows
        // stay in the pool (the criteria decide whether a disabled seed may
        // act as a signal seed) but are only classified when retained.
        let mut pool: Vec<Candidate<'_>> = Vec::with_capacity(table.len());
        let mut skipped: Vec<SkippedRow> = Vec::new();
        for (idx, row) in table.rows().iter().enumerate() {
            let Some(name) = row.get(name_col).and_then(CellValue::as_str) else {
                warn!(row = idx, "skipping row without a seed name");
                skipped.push(SkippedRow {
                    row: idx,
                    seed: None,
                    reason: SkipReason::InvalidSeedName,
                });
                continue;
            };
            if !is_valid_seed(name) {
                warn!(row = idx, seed = name, "skipping invalid seed name");
                skipped.push(SkippedRow {
                    row: idx,
                    seed: Some(name.to_string()),
                    reason: SkipReason::InvalidSeedName,
                });
                continue;
            }
            let Some(prescale) = row.get(ps_col).and_then(|c| Prescale::from_cell(c)) else {
                warn!(row = idx, seed = name, "skipping row with unreadable prescale");
                skipped.push(SkippedRow {
                    row: idx,
                    seed: Some(name.to_string()),
                    reason: SkipReason::UnparsablePrescale,
                });
                continue;
            };
            if !self.config.write_mode.retains(prescale) {
                skipped.push(SkippedRow {
                    row: idx,
                    seed: Some(name.to_string()),
                    reason: SkipReason::WriteModeFiltered,
                });
                continue;
            }
            pool.push(Candidate {
                row: idx,
                name,
                prescale,
            });
        }

        let mut active: Vec<usize> = Vec::with_capacity(pool.len());
        for (i, cand) in pool.iter().enumerate() {
            if cand.prescale.is_disabled() && !self.config.keep_zero_prescales {
                skipped.push(SkippedRow {
                    row: cand.row,
                    seed: Some(cand.name.to_string()),
                    reason: SkipReason::ZeroPrescale,
                });
            } else {
                active.push(i);
            }
        }

        let opts = CriterionOptions::from_config(&self.config);
        let force: FxHashSet<&str> = self
            .config
            .force_backup_seeds
            .iter()
            .map(String::as_str)
            .collect();

        // Embarrassingly parallel across candidates; each evaluation reads
        // the full pool and writes only its own decision. Collection keeps
        // index order, so the log stays deterministic.
        let decisions: Vec<RowDecision> = active
            .par_iter()
            .map(|&i| {
                let cand = &pool[i];
                if force.contains(cand.name) {
                    return RowDecision {
                        row: cand.row,
                        seed: cand.name.to_string(),
                        prescale: cand.prescale,
                        forced: true,
                        matches: Vec::new(),
                    };
                }

                let candidate = SeedRef::new(cand.name, cand.prescale);
                let mut matches = Vec::new();
                for other in &pool {
                    if other.row == cand.row {
                        continue;
                    }
                    let reference = SeedRef::new(other.name, other.prescale);
                    for criterion in &self.criteria {
                        if let Verdict::BackupOf {
                            signal,
                            criterion: kind,
                        } = criterion.evaluate(candidate, reference, &opts)
                        {
                            matches.push(BackupMatch {
                                signal,
                                signal_prescale: other.prescale,
                                criterion: kind,
                            });
                        }
                    }
                }
                debug!(seed = cand.name, matches = matches.len(), "evaluated seed");
                RowDecision {
                    row: cand.row,
                    seed: cand.name.to_string(),
                    prescale: cand.prescale,
                    forced: false,
                    matches,
                }
            })
            .collect();

        let (signal, backup) = partition(table, &decisions)?;
        let entries = decisions.iter().map(log_entry).collect();

        info!(
            rows = table.len(),
            signal = signal.len(),
            backup = backup.len(),
            skipped = skipped.len(),
            "classification finished"
        );

        Ok(Classification {
            signal,
            backup,
            log: DecisionLog {
                config: self.config.clone(),
                active_criteria: self.active_criteria(),
                entries,
            },
            skipped,
        })
    }
}

/// Collapse a row decision into its log entry, deduplicating signal seeds
/// and criterion names while keeping evaluation order.
fn log_entry(decision: &RowDecision) -> DecisionEntry {
    let mut signals: Vec<SignalSeed> = Vec::new();
    let mut criteria_used: Vec<&'static str> = Vec::new();
    for m in &decision.matches {
        let signal = SignalSeed {
            name: m.signal.clone(),
            prescale: m.signal_prescale,
        };
        if !signals.contains(&signal) {
            signals.push(signal);
        }
        let name = m.criterion.name();
        if !criteria_used.contains(&name) {
            criteria_used.push(name);
        }
    }
    if decision.forced {
        criteria_used.push(FORCED_PROVENANCE);
    }
    DecisionEntry {
        seed: decision.seed.clone(),
        prescale: decision.prescale,
        is_backup: decision.is_backup(),
        forced: decision.forced,
        signals,
        criteria: criteria_used,
    }
}
