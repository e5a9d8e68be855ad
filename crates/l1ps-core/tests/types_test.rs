//! Tests for the prescale table abstraction.

use l1ps_core::types::{CellValue, MenuSeed, Prescale, PrescaleTable};
use l1ps_core::TableError;

fn table_with(headers: &[&str], rows: &[&[CellValue]]) -> PrescaleTable {
    let mut table = PrescaleTable::new(headers.iter().map(|s| s.to_string()).collect());
    for row in rows {
        table.push_row(row.to_vec()).unwrap();
    }
    table
}

#[test]
fn test_name_column_picks_most_seed_like() {
    // "Comment" mentions a seed mid-string; only "Name" starts with the prefix.
    let table = table_with(
        &["Name", "PS", "Comment"],
        &[
            &[
                CellValue::from("L1_SingleMu22"),
                CellValue::from(1u64),
                CellValue::from("see L1_SingleMu25"),
            ],
            &[
                CellValue::from("L1_SingleJet180"),
                CellValue::from(2u64),
                CellValue::Empty,
            ],
        ],
    );
    assert_eq!(table.name_column().unwrap(), 0);
}

#[test]
fn test_name_column_tie_is_ambiguous() {
    let table = table_with(
        &["A", "B", "PS"],
        &[&[
            CellValue::from("L1_SingleMu22"),
            CellValue::from("L1_SingleMu22"),
            CellValue::from(1u64),
        ]],
    );
    assert!(matches!(
        table.name_column(),
        Err(TableError::AmbiguousNameColumn { .. })
    ));
}

#[test]
fn test_prescale_column_case_insensitive() {
    for header in ["Prescale", "prescale", "PS", "ps"] {
        let table = table_with(&["Name", header], &[]);
        assert_eq!(table.prescale_column().unwrap(), 1, "header {header}");
    }
}

#[test]
fn test_empty_like_preserves_columns_only() {
    let table = table_with(
        &["Name", "PS"],
        &[&[CellValue::from("L1_SingleMu22"), CellValue::from(1u64)]],
    );
    let empty = table.empty_like();
    assert_eq!(empty.columns(), table.columns());
    assert!(empty.is_empty());
}

#[test]
fn test_table_json_round_trip() {
    // Tables cross the I/O boundary as JSON; the untagged cell representation
    // must survive the trip.
    let table = table_with(
        &["Name", "PS", "Comment"],
        &[&[
            CellValue::from("L1_SingleMu22"),
            CellValue::from(120u64),
            CellValue::Empty,
        ]],
    );
    let encoded = serde_json::to_string(&table).unwrap();
    let decoded: PrescaleTable = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, table);
}

#[test]
fn test_menu_seed_json_shape() {
    let seed = MenuSeed::new(7, "L1_SingleMu22");
    let encoded = serde_json::to_value(&seed).unwrap();
    assert_eq!(encoded["index"], 7);
    assert_eq!(encoded["name"], "L1_SingleMu22");
}

#[test]
fn test_prescale_ordering() {
    assert!(Prescale::new(2) > Prescale::new(1));
    assert!(Prescale::DISABLED < Prescale::new(1));
    assert!(Prescale::DISABLED.is_disabled());
}
