//! The classification engine.

pub mod classifier;
pub mod decision_log;

pub use classifier::{
    BackupMatch, Classification, Classifier, RowDecision, SkipReason, SkippedRow,
};
pub use decision_log::{DecisionEntry, DecisionLog, SignalSeed, FORCED_PROVENANCE};
