//! End-to-end tests for the classification engine.

use l1ps_analysis::engine::{SkipReason, FORCED_PROVENANCE};
use l1ps_analysis::Classifier;
use l1ps_core::config::{ClassifyConfig, WriteMode};
use l1ps_core::errors::TableError;
use l1ps_core::types::{CellValue, PrescaleTable};
use l1ps_core::ClassifyError;

/// A small but representative menu: an eta-restricted backup, a tighter-pT
/// backup, a prescaled duplicate, a disabled seed, and a foreign row.
fn sample_table() -> PrescaleTable {
    let mut table = PrescaleTable::new(vec![
        "Index".into(),
        "Name".into(),
        "PS".into(),
        "Comment".into(),
    ]);
    let rows: Vec<(u64, &str, &str)> = vec![
        (0, "L1_SingleMu22", "1"),
        (1, "L1_SingleMu22er1p5", "1"),
        (2, "L1_SingleMu25", "1"),
        (3, "L1_SingleJet180", "1"),
        (4, "L1_ZeroBias", "0"),
        (5, "HLT_Mu50", "1"),
        (6, "L1_ETM150", "10"),
        (7, "L1_ETM150", "1"),
    ];
    for (index, name, ps) in rows {
        table
            .push_row(vec![
                CellValue::from(index),
                CellValue::from(name),
                CellValue::from(ps),
                CellValue::Empty,
            ])
            .unwrap();
    }
    table
}

fn names(table: &PrescaleTable, col: usize) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|r| r.get(col).unwrap().to_string())
        .collect()
}

#[test]
fn test_classification_partitions() {
    let classification = Classifier::with_defaults()
        .classify(&sample_table())
        .unwrap();

    assert_eq!(
        names(&classification.backup, 1),
        ["L1_SingleMu22er1p5", "L1_SingleMu25", "L1_ETM150"]
    );
    assert_eq!(
        names(&classification.signal, 1),
        ["L1_SingleMu22", "L1_SingleJet180", "L1_ETM150"]
    );
    // the backup ETM150 is the prescaled one
    assert_eq!(classification.backup.cell(2, 2), Some(&CellValue::from("10")));

    // schema is preserved
    assert_eq!(classification.signal.columns(), sample_table().columns());
    assert_eq!(classification.backup.columns(), sample_table().columns());
}

#[test]
fn test_skips_are_recorded_not_raised() {
    let classification = Classifier::with_defaults()
        .classify(&sample_table())
        .unwrap();

    let reasons: Vec<(Option<&str>, SkipReason)> = classification
        .skipped
        .iter()
        .map(|s| (s.seed.as_deref(), s.reason))
        .collect();
    assert!(reasons.contains(&(Some("HLT_Mu50"), SkipReason::InvalidSeedName)));
    assert!(reasons.contains(&(Some("L1_ZeroBias"), SkipReason::ZeroPrescale)));
    assert_eq!(classification.skipped.len(), 2);
}

#[test]
fn test_decision_log_provenance() {
    let classification = Classifier::with_defaults()
        .classify(&sample_table())
        .unwrap();

    let entry = classification
        .log
        .entries
        .iter()
        .find(|e| e.seed == "L1_SingleMu22er1p5")
        .unwrap();
    assert!(entry.is_backup);
    assert!(entry.signals.iter().any(|s| s.name == "L1_SingleMu22"));
    assert!(entry.criteria.contains(&"eta-restriction"));

    let entry = classification
        .log
        .entries
        .iter()
        .find(|e| e.seed == "L1_SingleMu25")
        .unwrap();
    assert!(entry.criteria.contains(&"pt"));

    // the run configuration is echoed for reproducibility
    assert_eq!(
        classification.log.active_criteria.len(),
        Classifier::with_defaults().active_criteria().len()
    );
}

#[test]
fn test_force_list_bypasses_evaluation() {
    let config = ClassifyConfig {
        force_backup_seeds: vec!["L1_SingleJet180".into()],
        ..ClassifyConfig::default()
    };
    let classification = Classifier::new(config)
        .unwrap()
        .classify(&sample_table())
        .unwrap();

    let entry = classification
        .log
        .entries
        .iter()
        .find(|e| e.seed == "L1_SingleJet180")
        .unwrap();
    assert!(entry.is_backup);
    assert!(entry.forced);
    assert_eq!(entry.criteria, vec![FORCED_PROVENANCE]);
    assert!(entry.signals.is_empty());
    assert!(names(&classification.backup, 1).contains(&"L1_SingleJet180".to_string()));
}

#[test]
fn test_write_mode_prefilter() {
    let config = ClassifyConfig {
        write_mode: WriteMode::Prescaled,
        ..ClassifyConfig::default()
    };
    let classification = Classifier::new(config)
        .unwrap()
        .classify(&sample_table())
        .unwrap();

    // only the prescaled ETM150 row is considered; with its partner filtered
    // away, nothing flags it
    assert_eq!(names(&classification.signal, 1), ["L1_ETM150"]);
    assert!(classification.backup.is_empty());
    assert!(classification
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::WriteModeFiltered));
}

#[test]
fn test_keep_zero_prescales_classifies_disabled_rows() {
    let config = ClassifyConfig {
        keep_zero_prescales: true,
        ..ClassifyConfig::default()
    };
    let classification = Classifier::new(config)
        .unwrap()
        .classify(&sample_table())
        .unwrap();

    assert!(names(&classification.signal, 1).contains(&"L1_ZeroBias".to_string()));
    assert!(!classification
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::ZeroPrescale));
}

#[test]
fn test_criteria_subset_from_config() {
    let config = ClassifyConfig {
        criteria: vec!["prescale".into()],
        ..ClassifyConfig::default()
    };
    let classifier = Classifier::new(config).unwrap();
    assert_eq!(classifier.active_criteria(), ["prescale"]);

    let classification = classifier.classify(&sample_table()).unwrap();
    // only the duplicated seed is flagged now
    assert_eq!(names(&classification.backup, 1), ["L1_ETM150"]);
}

#[test]
fn test_unknown_criterion_rejected_at_build_time() {
    let config = ClassifyConfig {
        criteria: vec!["pt-sideways".into()],
        ..ClassifyConfig::default()
    };
    assert!(matches!(
        Classifier::new(config),
        Err(ClassifyError::Config(_))
    ));
}

#[test]
fn test_ambiguous_prescale_column_is_fatal() {
    let mut table = PrescaleTable::new(vec!["Name".into(), "PS".into(), "Prescale".into()]);
    table
        .push_row(vec![
            CellValue::from("L1_SingleMu22"),
            CellValue::from(1u64),
            CellValue::from(1u64),
        ])
        .unwrap();
    assert!(matches!(
        Classifier::with_defaults().classify(&table),
        Err(ClassifyError::Table(TableError::AmbiguousPrescaleColumn { .. }))
    ));
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = Classifier::with_defaults();
    let table = sample_table();
    let first = classifier.classify(&table).unwrap();
    let second = classifier.classify(&table).unwrap();

    assert_eq!(first.signal, second.signal);
    assert_eq!(first.backup, second.backup);
    assert_eq!(first.log.entries, second.log.entries);
    assert_eq!(first.skipped, second.skipped);
}

#[test]
fn test_log_serializes_for_the_reporting_layer() {
    let classification = Classifier::with_defaults()
        .classify(&sample_table())
        .unwrap();
    let encoded = serde_json::to_value(&classification.log).unwrap();
    assert!(encoded["config"]["check_prescales"].as_bool().unwrap());
    assert!(encoded["entries"].as_array().unwrap().len() >= 4);
}

#[test]
fn test_log_renders_as_table() {
    let classification = Classifier::with_defaults()
        .classify(&sample_table())
        .unwrap();
    let rendered = classification.log.to_table().unwrap();
    assert_eq!(
        rendered.columns(),
        ["seed", "prescale", "signal seeds", "criteria"]
    );
    assert_eq!(rendered.len(), classification.log.entries.len());
}
