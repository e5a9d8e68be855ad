//! Run configuration.

pub mod classify_config;

pub use classify_config::{ClassifyConfig, WriteMode};
