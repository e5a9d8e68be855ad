//! Prescale table regeneration for an updated trigger menu.
//!
//! For every seed of the new menu, values are copied verbatim from the old
//! table where the seed exists; anything else goes through the estimation
//! hook and is collected in the missing list. The output keeps the old
//! table's column order and is sorted by new-menu index.

use l1ps_core::constants::INDEX_COLUMN_NAME;
use l1ps_core::errors::TableError;
use l1ps_core::types::{CellValue, MenuSeed, PrescaleTable};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{info, warn};

/// Estimation hook for values absent from the old table.
pub trait ValueEstimator: Send + Sync {
    /// Estimate a value for a seed/column pair, or `None` when no estimate
    /// is available.
    fn estimate(&self, seed: &str, column: &str) -> Option<CellValue>;
}

/// The default estimator: no estimate available. An explicit extension
/// point, kept separate so smarter estimators can be plugged in per run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEstimate;

impl ValueEstimator for NoEstimate {
    fn estimate(&self, _seed: &str, _column: &str) -> Option<CellValue> {
        None
    }
}

/// One value the old table could not provide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValue {
    pub index: u64,
    pub seed: String,
    pub column: String,
    pub estimate: Option<CellValue>,
}

/// All values that had to be estimated during a regeneration, in menu order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MissingList {
    entries: Vec<MissingValue>,
}

impl MissingList {
    pub fn entries(&self) -> &[MissingValue] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the list as a warning table. Consecutive entries for the same
    /// seed blank their repeated index/seed cells, and numeric column labels
    /// are shown in scientific notation.
    pub fn to_table(&self) -> Result<PrescaleTable, TableError> {
        let mut table = PrescaleTable::new(vec![
            "Index".to_string(),
            "seed name".to_string(),
            "PS column".to_string(),
            "estimated value".to_string(),
        ]);
        let mut prev_index: Option<u64> = None;
        for entry in &self.entries {
            let repeated = prev_index == Some(entry.index);
            prev_index = Some(entry.index);
            let (index_cell, seed_cell) = if repeated {
                (CellValue::Empty, CellValue::Empty)
            } else {
                (
                    CellValue::from(entry.index),
                    CellValue::from(entry.seed.as_str()),
                )
            };
            let estimate_cell = match &entry.estimate {
                Some(value) => value.clone(),
                None => CellValue::from("none"),
            };
            table.push_row(vec![
                index_cell,
                seed_cell,
                CellValue::from(scientific_label(&entry.column)),
                estimate_cell,
            ])?;
        }
        Ok(table)
    }
}

/// Column labels that are plain numbers (luminosity columns) are displayed
/// in scientific notation, `1.60E+34` style.
fn scientific_label(column: &str) -> String {
    match column.trim().parse::<f64>() {
        Ok(value) => {
            let formatted = format!("{:.2E}", value);
            match formatted.split_once('E') {
                Some((mantissa, exp)) => {
                    let (sign, digits) = match exp.strip_prefix('-') {
                        Some(rest) => ("-", rest),
                        None => ("+", exp),
                    };
                    format!("{mantissa}E{sign}{digits:0>2}")
                }
                None => formatted,
            }
        }
        Err(_) => column.to_string(),
    }
}

/// The result of a regeneration run.
#[derive(Debug)]
pub struct Regeneration {
    /// The new table, old column order, new-menu row order.
    pub table: PrescaleTable,
    /// Everything that was not found verbatim in the old table.
    pub missing: MissingList,
}

/// Builds a new prescale table for an updated menu from an existing one.
pub struct Regenerator {
    estimator: Box<dyn ValueEstimator>,
}

impl Default for Regenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Regenerator {
    pub fn new() -> Self {
        Self {
            estimator: Box::new(NoEstimate),
        }
    }

    /// Replace the estimation hook.
    pub fn with_estimator(mut self, estimator: Box<dyn ValueEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Build a new table for `menu` from `old`. Lookup misses are non-fatal:
    /// they are estimated, collected, and processing continues.
    pub fn regenerate(
        &self,
        old: &PrescaleTable,
        menu: &[MenuSeed],
    ) -> Result<Regeneration, TableError> {
        let name_col = old.name_column()?;

        // seed name -> first row holding it
        let mut lookup: FxHashMap<&str, usize> = FxHashMap::default();
        for (idx, row) in old.rows().iter().enumerate() {
            if let Some(name) = row.get(name_col).and_then(CellValue::as_str) {
                lookup.entry(name).or_insert(idx);
            }
        }

        let mut ordered: Vec<&MenuSeed> = menu.iter().collect();
        ordered.sort_by_key(|seed| seed.index);

        let mut table = old.empty_like();
        let mut missing = MissingList::default();

        for seed in ordered {
            let old_row = lookup.get(seed.name.as_str()).copied();
            let mut cells = Vec::with_capacity(old.columns().len());
            for (col_idx, column) in old.columns().iter().enumerate() {
                if column.eq_ignore_ascii_case(INDEX_COLUMN_NAME) {
                    cells.push(CellValue::from(seed.index));
                } else if col_idx == name_col {
                    cells.push(CellValue::from(seed.name.as_str()));
                } else if let Some(row) = old_row {
                    cells.push(old.cell(row, col_idx).cloned().unwrap_or_default());
                } else {
                    let estimate = self.estimator.estimate(&seed.name, column);
                    warn!(
                        seed = seed.name.as_str(),
                        column = column.as_str(),
                        "prescale value not found in the old table; estimated"
                    );
                    missing.entries.push(MissingValue {
                        index: seed.index,
                        seed: seed.name.clone(),
                        column: column.clone(),
                        estimate: estimate.clone(),
                    });
                    cells.push(estimate.unwrap_or_default());
                }
            }
            table.push_row(cells)?;
        }

        info!(
            seeds = menu.len(),
            missing = missing.len(),
            "prescale table regenerated"
        );

        Ok(Regeneration { table, missing })
    }
}
