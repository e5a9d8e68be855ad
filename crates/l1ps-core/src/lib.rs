//! l1ps-core: shared foundation for the l1ps prescale-table tools.
//!
//! This crate provides everything the analysis engine builds on:
//! - Types: the in-memory prescale table abstraction (ordered rows, named
//!   columns, prescale/name column identification), cell values, prescales,
//!   and new-menu seed entries
//! - Errors: typed error families with stable report codes
//! - Config: the classification run configuration surface
//! - Tracing: logging initialization
//! - Constants: seed grammar prefix and column header conventions

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-exports for convenience
pub use config::{ClassifyConfig, WriteMode};
pub use errors::{ClassifyError, ConfigError, TableError};
pub use types::{CellValue, MenuSeed, Prescale, PrescaleTable, Row};
