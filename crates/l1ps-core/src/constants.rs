//! Shared constants for the seed grammar and table conventions.

/// Mandatory prefix of every seed name.
pub const SEED_PREFIX: &str = "L1_";

/// Accepted prescale column headers (matched case-insensitively).
pub const PRESCALE_COLUMN_NAMES: &[&str] = &["prescale", "ps"];

/// Column header treated as the menu-index identity column during
/// regeneration (matched case-insensitively).
pub const INDEX_COLUMN_NAME: &str = "index";

/// Environment variable read by `init_tracing` for log levels.
pub const LOG_ENV_VAR: &str = "L1PS_LOG";

/// Fallback log filter when the environment variable is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "l1ps=info";
