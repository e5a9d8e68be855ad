//! Numeric token parsing.

/// Parse a seed-name number: `"22"`, `"1p5"` (p is the decimal point) and
/// stray underscores are all accepted. `None` on anything else; a malformed
/// token must never abort a comparison.
pub fn parse_decimal(token: &str) -> Option<f64> {
    let cleaned = token.replace('_', "").replace('p', ".");
    cleaned.parse().ok()
}
