//! ErrorCode trait for the reporting boundary.

/// Trait giving every error a stable machine-readable code.
/// The excluded reporting layer keys its exit handling and rendered
/// summaries off these strings rather than off display text.
pub trait ErrorCode {
    /// Returns the report code string (e.g., "MISSING_COLUMN").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Report code constants.
pub const TABLE_ERROR: &str = "TABLE_ERROR";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const AMBIGUOUS_COLUMN: &str = "AMBIGUOUS_COLUMN";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNKNOWN_CRITERION: &str = "UNKNOWN_CRITERION";
