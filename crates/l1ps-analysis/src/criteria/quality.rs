//! Muon quality criterion.
//!
//! Applies to SingleMu/DoubleMu/TripleMu/QuadMu seeds only. Qualities from
//! tighter to looser: SQ (single) < DQ (double) < OQ (open). A seed without
//! an explicit flag carries the default of its multiplicity class: SQ for
//! single-muon seeds, DQ for multi-muon seeds.

use crate::seed::segments::QUALITY_FLAG;
use crate::seed::{basename, occurrences, MultiplicityClass};

use super::traits::{prescale_preconditions, Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};

/// The known flags, in tightness order.
const QUALITY_FLAGS: &[&str] = &["_SQ", "_DQ", "_OQ"];

const MUON_BASENAMES: &[&str] = &["singlemu", "doublemu", "triplemu", "quadmu"];

/// Muon quality levels, tightest first; the derived ordering is the
/// tightness ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MuonQuality {
    Single,
    Double,
    Open,
}

impl MuonQuality {
    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "_SQ" => Some(Self::Single),
            "_DQ" => Some(Self::Double),
            "_OQ" => Some(Self::Open),
            _ => None,
        }
    }

    /// The quality an unflagged seed of the given class carries.
    fn default_for(class: MultiplicityClass) -> Self {
        match class {
            MultiplicityClass::Single => Self::Single,
            _ => Self::Double,
        }
    }
}

pub struct MuonQualityCriterion;

impl MuonQualityCriterion {
    /// The seed's effective quality: its explicit flag, or the class default.
    fn effective_quality(name: &str, class: MultiplicityClass) -> MuonQuality {
        QUALITY_FLAGS
            .iter()
            .find(|flag| name.contains(*flag))
            .and_then(|flag| MuonQuality::from_flag(flag))
            .unwrap_or_else(|| MuonQuality::default_for(class))
    }

    /// The name with the basename and every quality flag removed.
    fn residual(name: &str, base: &str) -> String {
        let mut stripped = name.replace(base, "");
        for flag in QUALITY_FLAGS {
            stripped = stripped.replace(flag, "");
        }
        stripped
    }
}

impl Criterion for MuonQualityCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::MuonQuality
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

        let Some(base) = basename(candidate.name) else {
            return Verdict::NotApplicable;
        };
        let base_lower = base.to_ascii_lowercase();
        if !MUON_BASENAMES.iter().any(|m| base_lower.contains(m)) {
            return Verdict::NotApplicable;
        }
        if !reference.name.starts_with(&base) {
            return Verdict::NotApplicable;
        }

        // more than one flag in a name is ambiguous; never guess
        if occurrences(&QUALITY_FLAG, candidate.name) > 1
            || occurrences(&QUALITY_FLAG, reference.name) > 1
        {
            return Verdict::NotApplicable;
        }

        // the rest of the names must match exactly
        if Self::residual(candidate.name, &base) != Self::residual(reference.name, &base) {
            return Verdict::NotApplicable;
        }

        let class = MultiplicityClass::of_basename(&base);
        let cand_quality = Self::effective_quality(candidate.name, class);
        let ref_quality = Self::effective_quality(reference.name, class);

        if cand_quality < ref_quality {
            Verdict::backup_of(reference.name, self.kind())
        } else {
            Verdict::Reject
        }
    }
}
