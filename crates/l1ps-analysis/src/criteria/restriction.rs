//! Generic restriction criterion driven by a declarative dimension table.
//!
//! The eta, dR-max, dR-min, mass-window, and isolation rules share one
//! shape: isolate this dimension's segment in both names, require the rest
//! of the names to match, then compare tightness. Each dimension is a
//! `DimensionSpec` entry; one evaluator serves them all.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::seed::{basename, first_match, occurrences, parse_decimal, segments, strip_once};

use super::traits::{prescale_preconditions, Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};

/// Direction in which a scalar restriction tightens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tightness {
    /// A smaller value selects fewer events (eta restriction, dR max).
    SmallerIsTighter,
    /// A larger value selects fewer events (dR min).
    LargerIsTighter,
}

/// How a dimension's extracted attributes compare.
#[derive(Debug, Clone, Copy)]
pub enum Comparator {
    /// One numeric value per name; an unrestricted name is the loosest. A
    /// restricted seed backs up an unrestricted one only for positive values.
    Scalar { tightness: Tightness },
    /// A `<lo>to<hi>` window; narrower is tighter, and any window is tighter
    /// than none.
    WindowWidth,
    /// A closed flag set ordered tightest-first; an absent flag ranks last.
    Ordinal { order: &'static [&'static str] },
}

/// Declarative description of one restriction dimension.
pub struct DimensionSpec {
    pub kind: CriterionKind,
    pub pattern: &'static Lazy<Regex>,
    /// Literal prefix removed from a matched segment before numeric parsing.
    pub value_prefix: &'static str,
    pub comparator: Comparator,
}

pub static ETA_DIMENSION: DimensionSpec = DimensionSpec {
    kind: CriterionKind::EtaRestriction,
    pattern: &segments::ETA_RESTRICTION,
    value_prefix: "er",
    comparator: Comparator::Scalar {
        tightness: Tightness::SmallerIsTighter,
    },
};

pub static DR_MAX_DIMENSION: DimensionSpec = DimensionSpec {
    kind: CriterionKind::DrMax,
    pattern: &segments::DR_MAX,
    value_prefix: "dR_Max",
    comparator: Comparator::Scalar {
        tightness: Tightness::SmallerIsTighter,
    },
};

pub static DR_MIN_DIMENSION: DimensionSpec = DimensionSpec {
    kind: CriterionKind::DrMin,
    pattern: &segments::DR_MIN,
    value_prefix: "dR_Min",
    comparator: Comparator::Scalar {
        tightness: Tightness::LargerIsTighter,
    },
};

pub static MASS_DIMENSION: DimensionSpec = DimensionSpec {
    kind: CriterionKind::MassWindow,
    pattern: &segments::MASS_WINDOW,
    value_prefix: "Mass",
    comparator: Comparator::WindowWidth,
};

pub static ISOLATION_DIMENSION: DimensionSpec = DimensionSpec {
    kind: CriterionKind::Isolation,
    pattern: &segments::ISOLATION,
    value_prefix: "",
    comparator: Comparator::Ordinal {
        order: &["Iso", "LooseIso"],
    },
};

/// All table-driven dimensions, in battery order.
pub static DIMENSIONS: &[&DimensionSpec] = &[
    &ETA_DIMENSION,
    &DR_MAX_DIMENSION,
    &DR_MIN_DIMENSION,
    &MASS_DIMENSION,
    &ISOLATION_DIMENSION,
];

/// The generic evaluator over a `DimensionSpec`.
pub struct RestrictionCriterion {
    spec: &'static DimensionSpec,
}

impl RestrictionCriterion {
    pub fn new(spec: &'static DimensionSpec) -> Self {
        Self { spec }
    }

    fn scalar_value(&self, segment: &str) -> Option<f64> {
        let token = segment.strip_prefix(self.spec.value_prefix).unwrap_or(segment);
        parse_decimal(token)
    }

    /// `Mass[_]<lo>to<hi>` → (lo, hi).
    fn window_bounds(&self, segment: &str) -> Option<(f64, f64)> {
        let digits_at = segment.find(|c: char| c.is_ascii_digit())?;
        let (lo, hi) = segment[digits_at..].split_once("to")?;
        Some((parse_decimal(lo)?, parse_decimal(hi)?))
    }

    fn compare_scalar(
        &self,
        cand_seg: Option<&str>,
        ref_seg: Option<&str>,
        tightness: Tightness,
        reference: SeedRef<'_>,
    ) -> Verdict {
        let cand_val = match cand_seg {
            Some(seg) => match self.scalar_value(seg) {
                Some(v) => Some(v),
                None => return Verdict::NotApplicable,
            },
            None => None,
        };
        let ref_val = match ref_seg {
            Some(seg) => match self.scalar_value(seg) {
                Some(v) => Some(v),
                None => return Verdict::NotApplicable,
            },
            None => None,
        };

        let is_backup = match (cand_val, ref_val) {
            (Some(c), Some(r)) => match tightness {
                Tightness::SmallerIsTighter => c < r,
                Tightness::LargerIsTighter => c > r,
            },
            // restricted vs unrestricted: tighter as long as the cut bites
            (Some(c), None) => c > 0.0,
            (None, _) => false,
        };
        if is_backup {
            Verdict::backup_of(reference.name, self.spec.kind)
        } else {
            Verdict::Reject
        }
    }

    fn compare_window(
        &self,
        cand_seg: Option<&str>,
        ref_seg: Option<&str>,
        reference: SeedRef<'_>,
    ) -> Verdict {
        let cand = match cand_seg {
            Some(seg) => match self.window_bounds(seg) {
                Some(b) => Some(b),
                None => return Verdict::NotApplicable,
            },
            None => None,
        };
        let reference_window = match ref_seg {
            Some(seg) => match self.window_bounds(seg) {
                Some(b) => Some(b),
                None => return Verdict::NotApplicable,
            },
            None => None,
        };

        let is_backup = match (cand, reference_window) {
            (Some((clo, chi)), Some((rlo, rhi))) => chi - clo < rhi - rlo,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if is_backup {
            Verdict::backup_of(reference.name, self.spec.kind)
        } else {
            Verdict::Reject
        }
    }

    fn compare_ordinal(
        &self,
        cand_seg: Option<&str>,
        ref_seg: Option<&str>,
        order: &[&str],
        reference: SeedRef<'_>,
    ) -> Verdict {
        let rank = |seg: Option<&str>| match seg {
            Some(s) => order.iter().position(|o| *o == s),
            None => Some(order.len()),
        };
        let (Some(cand_rank), Some(ref_rank)) = (rank(cand_seg), rank(ref_seg)) else {
            return Verdict::NotApplicable;
        };
        if cand_rank < ref_rank {
            Verdict::backup_of(reference.name, self.spec.kind)
        } else {
            Verdict::Reject
        }
    }
}

impl Criterion for RestrictionCriterion {
    fn kind(&self) -> CriterionKind {
        self.spec.kind
    }

    fn evaluate(
        &self,
        candidate: SeedRef<'_>,
        reference: SeedRef<'_>,
        opts: &CriterionOptions,
    ) -> Verdict {
        if !prescale_preconditions(candidate, reference, opts) {
            return Verdict::NotApplicable;
        }

        let pattern = &**self.spec.pattern;
        let cand_count = occurrences(pattern, candidate.name);
        let ref_count = occurrences(pattern, reference.name);
        // ambiguous names (cross-triggers) are never guessed at
        if cand_count > 1 || ref_count > 1 {
            return Verdict::NotApplicable;
        }
        if cand_count == 0 && ref_count == 0 {
            return Verdict::NotApplicable;
        }

        let cand_seg = first_match(pattern, candidate.name);
        let ref_seg = first_match(pattern, reference.name);

        let cand_residual = cand_seg
            .map(|seg| strip_once(candidate.name, seg))
            .unwrap_or_else(|| candidate.name.to_string());
        let ref_residual = ref_seg
            .map(|seg| strip_once(reference.name, seg))
            .unwrap_or_else(|| reference.name.to_string());

        // Same seed family only. The check runs on the stripped names: an
        // isolation flag sits inside the basename token itself, so the raw
        // basenames of an Iso/non-Iso pair never agree.
        let (Some(cand_base), Some(ref_base)) = (basename(&cand_residual), basename(&ref_residual))
        else {
            return Verdict::NotApplicable;
        };
        if cand_base != ref_base {
            return Verdict::NotApplicable;
        }

        if !opts.lazy && cand_residual != ref_residual {
            return Verdict::NotApplicable;
        }

        match self.spec.comparator {
            Comparator::Scalar { tightness } => {
                self.compare_scalar(cand_seg, ref_seg, tightness, reference)
            }
            Comparator::WindowWidth => self.compare_window(cand_seg, ref_seg, reference),
            Comparator::Ordinal { order } => {
                self.compare_ordinal(cand_seg, ref_seg, order, reference)
            }
        }
    }
}
