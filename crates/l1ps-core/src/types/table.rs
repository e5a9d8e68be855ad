//! The in-memory prescale table abstraction.
//!
//! A table is an ordered list of rows over a column list that is fixed for
//! the table's lifetime. Exactly one column is the prescale column (header
//! `prescale`/`ps`, case-insensitive) and exactly one is the seed name column
//! (the column with the most values matching the seed grammar). Ambiguity in
//! either identification is a fatal configuration error.

use serde::{Deserialize, Serialize};

use crate::constants::{PRESCALE_COLUMN_NAMES, SEED_PREFIX};
use crate::errors::TableError;

use super::value::CellValue;

/// One table row; cells are positionally aligned with the table's columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, idx: usize) -> Option<&CellValue> {
        self.cells.get(idx)
    }
}

/// An ordered sequence of seed rows with a fixed column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescaleTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl PrescaleTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the column count.
    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<(), TableError> {
        if cells.len() != self.columns.len() {
            return Err(TableError::RowArityMismatch {
                expected: self.columns.len(),
                got: cells.len(),
            });
        }
        self.rows.push(Row::new(cells));
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with the given exact header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Locate the prescale column: the unique header matching one of the
    /// accepted names case-insensitively.
    pub fn prescale_column(&self) -> Result<usize, TableError> {
        let matches: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| {
                PRESCALE_COLUMN_NAMES
                    .iter()
                    .any(|id| col.eq_ignore_ascii_case(id))
            })
            .map(|(idx, _)| idx)
            .collect();

        match matches.as_slice() {
            [] => Err(TableError::MissingPrescaleColumn),
            [idx] => Ok(*idx),
            _ => Err(TableError::AmbiguousPrescaleColumn {
                candidates: matches.iter().map(|&i| self.columns[i].clone()).collect(),
            }),
        }
    }

    /// Locate the seed name column: the column with the most values starting
    /// with the seed prefix. Zero matches, or a tie for the maximum, is fatal.
    pub fn name_column(&self) -> Result<usize, TableError> {
        let mut counts = vec![0usize; self.columns.len()];
        for row in &self.rows {
            for (idx, cell) in row.cells().iter().enumerate() {
                if let Some(s) = cell.as_str() {
                    if s.starts_with(SEED_PREFIX) {
                        counts[idx] += 1;
                    }
                }
            }
        }

        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Err(TableError::MissingNameColumn);
        }
        let best: Vec<usize> = (0..counts.len()).filter(|&i| counts[i] == max).collect();
        match best.as_slice() {
            [idx] => Ok(*idx),
            _ => Err(TableError::AmbiguousNameColumn {
                candidates: best.iter().map(|&i| self.columns[i].clone()).collect(),
            }),
        }
    }

    /// A new table with the same column structure and no rows.
    pub fn empty_like(&self) -> PrescaleTable {
        PrescaleTable::new(self.columns.clone())
    }

    /// Index of the first row whose cell in `name_col` equals `seed`.
    pub fn find_row(&self, name_col: usize, seed: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(name_col).and_then(CellValue::as_str) == Some(seed))
    }

    /// Look up the cell for a given seed and column, resolving the name
    /// column first. `Ok(None)` means the seed is absent from the table.
    pub fn find_value(&self, seed: &str, column: &str) -> Result<Option<&CellValue>, TableError> {
        let name_col = self.name_column()?;
        let col = self
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn {
                name: column.to_string(),
            })?;
        Ok(self
            .find_row(name_col, seed)
            .and_then(|row| self.cell(row, col)))
    }

    /// A copy of this table with its columns reordered. Every requested
    /// column must exist.
    pub fn select_columns(&self, order: &[String]) -> Result<PrescaleTable, TableError> {
        let mut indices = Vec::with_capacity(order.len());
        for name in order {
            indices.push(self.column_index(name).ok_or_else(|| {
                TableError::UnknownColumn { name: name.clone() }
            })?);
        }

        let mut out = PrescaleTable::new(order.to_vec());
        for row in &self.rows {
            let cells = indices.iter().map(|&i| row.cells()[i].clone()).collect();
            out.push_row(cells)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PrescaleTable {
        let mut table = PrescaleTable::new(vec![
            "Index".into(),
            "Name".into(),
            "Prescale".into(),
            "Comment".into(),
        ]);
        table
            .push_row(vec![
                CellValue::from(0u64),
                CellValue::from("L1_SingleMu22"),
                CellValue::from(1u64),
                CellValue::Empty,
            ])
            .unwrap();
        table
            .push_row(vec![
                CellValue::from(1u64),
                CellValue::from("L1_SingleMu25"),
                CellValue::from(5u64),
                CellValue::from("note"),
            ])
            .unwrap();
        table
    }

    #[test]
    fn test_column_identification() {
        let table = sample_table();
        assert_eq!(table.prescale_column().unwrap(), 2);
        assert_eq!(table.name_column().unwrap(), 1);
    }

    #[test]
    fn test_ambiguous_prescale_column_is_fatal() {
        let table = PrescaleTable::new(vec!["PS".into(), "prescale".into()]);
        assert!(matches!(
            table.prescale_column(),
            Err(TableError::AmbiguousPrescaleColumn { .. })
        ));
    }

    #[test]
    fn test_missing_name_column_is_fatal() {
        let mut table = PrescaleTable::new(vec!["Name".into(), "PS".into()]);
        table
            .push_row(vec![CellValue::from("not_a_seed"), CellValue::from(1u64)])
            .unwrap();
        assert!(matches!(
            table.name_column(),
            Err(TableError::MissingNameColumn)
        ));
    }

    #[test]
    fn test_row_arity_is_checked() {
        let mut table = PrescaleTable::new(vec!["Name".into(), "PS".into()]);
        let err = table.push_row(vec![CellValue::from("L1_SingleMu22")]);
        assert!(matches!(
            err,
            Err(TableError::RowArityMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_find_value() {
        let table = sample_table();
        let hit = table.find_value("L1_SingleMu25", "Prescale").unwrap();
        assert_eq!(hit, Some(&CellValue::from(5u64)));
        let miss = table.find_value("L1_SingleJet180", "Prescale").unwrap();
        assert_eq!(miss, None);
    }

    #[test]
    fn test_select_columns_reorders() {
        let table = sample_table();
        let order: Vec<String> = vec![
            "Name".into(),
            "Prescale".into(),
            "Index".into(),
            "Comment".into(),
        ];
        let out = table.select_columns(&order).unwrap();
        assert_eq!(out.columns(), order.as_slice());
        assert_eq!(
            out.cell(0, 0),
            Some(&CellValue::from("L1_SingleMu22"))
        );
    }
}
