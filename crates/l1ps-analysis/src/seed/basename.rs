//! Basename extraction and object-multiplicity classification.

use l1ps_core::constants::SEED_PREFIX;
use serde::{Deserialize, Serialize};

/// Extract a seed's invariant basename: the prefix plus the leading
/// alphabetic run of the first underscore-delimited token, cut at the first
/// digit. `L1_DoubleMu15_SQ` yields `L1_DoubleMu`.
///
/// Returns `None` for names missing the mandatory prefix; callers treat such
/// seeds as outside the grammar rather than failing.
pub fn basename(seed: &str) -> Option<String> {
    let rest = seed.strip_prefix(SEED_PREFIX)?;
    let token = rest.split('_').next().unwrap_or("");
    let alpha_end = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    Some(format!("{}{}", SEED_PREFIX, &token[..alpha_end]))
}

/// Whether a name satisfies the basic seed grammar.
pub fn is_valid_seed(seed: &str) -> bool {
    seed.starts_with(SEED_PREFIX)
}

/// How many trigger objects a seed selects on, inferred from its basename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiplicityClass {
    Single,
    Double,
    Triple,
    Quad,
}

impl MultiplicityClass {
    /// Infer the class from a basename. Absence of a multiplicity keyword
    /// means a single-object seed.
    pub fn of_basename(basename: &str) -> Self {
        let lower = basename.to_ascii_lowercase();
        if lower.contains("double") {
            Self::Double
        } else if lower.contains("triple") {
            Self::Triple
        } else if lower.contains("quad") {
            Self::Quad
        } else {
            Self::Single
        }
    }

    /// Number of positional thresholds a seed of this class carries.
    pub fn object_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Quad => 4,
        }
    }
}
