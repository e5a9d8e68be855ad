//! Attribute segment patterns and strip normalization.
//!
//! One compiled pattern per attribute dimension. Longer alternatives come
//! first: the regex engine matches alternations leftmost-first, so `er2p5`
//! must be tried before `er2` and `LooseIso` before `Iso`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Eta restriction: `er<int>p<int>` or `er<int>`.
pub static ETA_RESTRICTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"er\d+p\d+|er\d+").unwrap());

/// Angular separation upper bound: `dR_Max<int>[p<int>]`.
pub static DR_MAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"dR_Max\d+p\d+|dR_Max\d+").unwrap());

/// Angular separation lower bound: `dR_Min<int>[p<int>]`.
pub static DR_MIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"dR_Min\d+p\d+|dR_Min\d+").unwrap());

/// Invariant mass window: `Mass<lo>to<hi>`, optionally `Mass_<lo>to<hi>`.
pub static MASS_WINDOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Mass_?(?:\d+p\d+|\d+)to(?:\d+p\d+|\d+)").unwrap());

/// Isolation flags, tightest first in the quality ordering.
pub static ISOLATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"LooseIso|Iso").unwrap());

/// Muon quality flags.
pub static QUALITY_FLAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"_SQ|_DQ|_OQ").unwrap());

/// Number of non-overlapping occurrences of `pattern` in `name`.
///
/// More than one occurrence of a dimension's own pattern marks the name as
/// ambiguous for that dimension (cross-triggers); the criterion abstains.
pub fn occurrences(pattern: &Regex, name: &str) -> usize {
    pattern.find_iter(name).count()
}

/// The first matched segment of `pattern` in `name`, if any.
pub fn first_match<'t>(pattern: &Regex, name: &'t str) -> Option<&'t str> {
    pattern.find(name).map(|m| m.as_str())
}

/// Remove the first occurrence of `segment` from `name`.
///
/// If the removal exposed a trailing delimiter, exactly one trailing `_` is
/// trimmed; nothing else in the name is altered. Stripping a segment that is
/// not present returns the name unchanged, which makes the operation
/// idempotent.
pub fn strip_once(name: &str, segment: &str) -> String {
    let Some(pos) = name.find(segment) else {
        return name.to_string();
    };
    let mut stripped = String::with_capacity(name.len() - segment.len());
    stripped.push_str(&name[..pos]);
    stripped.push_str(&name[pos + segment.len()..]);
    if stripped.ends_with('_') {
        stripped.pop();
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eta_pattern_prefers_decimal_form() {
        assert_eq!(
            first_match(&ETA_RESTRICTION, "L1_SingleMu22er1p5"),
            Some("er1p5")
        );
        assert_eq!(
            first_match(&ETA_RESTRICTION, "L1_SingleJet35er2"),
            Some("er2")
        );
    }

    #[test]
    fn test_isolation_pattern_prefers_loose_form() {
        assert_eq!(first_match(&ISOLATION, "L1_LooseIsoEG24"), Some("LooseIso"));
        assert_eq!(first_match(&ISOLATION, "L1_SingleIsoEG24"), Some("Iso"));
        assert_eq!(occurrences(&ISOLATION, "L1_LooseIsoEG24"), 1);
    }

    #[test]
    fn test_mass_window_pattern() {
        assert_eq!(
            first_match(&MASS_WINDOW, "L1_DoubleMu4p5_SQ_OS_Mass7to18"),
            Some("Mass7to18")
        );
        assert_eq!(
            first_match(&MASS_WINDOW, "L1_DoubleEG8_Mass_1p2to14"),
            Some("Mass_1p2to14")
        );
        // a bare minimum cut is not a window
        assert_eq!(first_match(&MASS_WINDOW, "L1_DoubleMu4_Mass_Min400"), None);
    }

    #[test]
    fn test_occurrences_flags_cross_triggers() {
        assert_eq!(
            occurrences(&ETA_RESTRICTION, "L1_DoubleMu0er1p5_Jet90er2p5"),
            2
        );
        assert_eq!(occurrences(&DR_MAX, "L1_DoubleMu4_SQ_OS_dR_Max1p2"), 1);
    }

    #[test]
    fn test_strip_once_trims_one_trailing_delimiter() {
        assert_eq!(
            strip_once("L1_DoubleMu4_SQ_OS_dR_Max1p2", "dR_Max1p2"),
            "L1_DoubleMu4_SQ_OS"
        );
        assert_eq!(strip_once("L1_SingleMu22er1p5", "er1p5"), "L1_SingleMu22");
        assert_eq!(strip_once("L1_SingleIsoEG24", "Iso"), "L1_SingleEG24");
    }

    #[test]
    fn test_strip_once_is_idempotent() {
        let once = strip_once("L1_DoubleMu4_SQ_OS_dR_Max1p2", "dR_Max1p2");
        let twice = strip_once(&once, "dR_Max1p2");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_strip_once_leaves_missing_segment_alone() {
        assert_eq!(strip_once("L1_SingleMu22", "er1p5"), "L1_SingleMu22");
    }
}
