//! Splitting a table into signal and backup row sets.

use l1ps_core::errors::TableError;
use l1ps_core::types::PrescaleTable;

use crate::engine::RowDecision;

/// Partition the input table into (signal, backup) tables per the engine's
/// decisions. Rows without a decision (skipped rows) appear in neither;
/// input rows are copied, never mutated.
pub fn partition(
    table: &PrescaleTable,
    decisions: &[RowDecision],
) -> Result<(PrescaleTable, PrescaleTable), TableError> {
    let mut signal = table.empty_like();
    let mut backup = table.empty_like();
    for decision in decisions {
        let Some(row) = table.rows().get(decision.row) else {
            continue;
        };
        let cells = row.cells().to_vec();
        if decision.is_backup() {
            backup.push_row(cells)?;
        } else {
            signal.push_row(cells)?;
        }
    }
    Ok((signal, backup))
}
