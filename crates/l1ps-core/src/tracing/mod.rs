//! Logging initialization.

pub mod setup;

pub use setup::init_tracing;
