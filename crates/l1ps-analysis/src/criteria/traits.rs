//! Criterion trait, verdicts, and the criterion kind enum.

use l1ps_core::config::ClassifyConfig;
use l1ps_core::types::Prescale;
use serde::{Deserialize, Serialize};

/// A seed name paired with its prescale, as one side of a comparison.
#[derive(Debug, Clone, Copy)]
pub struct SeedRef<'a> {
    pub name: &'a str,
    pub prescale: Prescale,
}

impl<'a> SeedRef<'a> {
    pub fn new(name: &'a str, prescale: Prescale) -> Self {
        Self { name, prescale }
    }
}

/// Options consumed by every criterion.
#[derive(Debug, Clone, Copy)]
pub struct CriterionOptions {
    /// A backup candidate must carry an equal-or-higher prescale than the
    /// seed it backs up.
    pub check_prescales: bool,
    /// Allow a disabled (prescale 0) seed to be identified as a signal seed.
    pub ignore_zero_prescales: bool,
    /// Skip the residual-equality check after segment stripping.
    pub lazy: bool,
}

impl Default for CriterionOptions {
    fn default() -> Self {
        Self {
            check_prescales: true,
            ignore_zero_prescales: false,
            lazy: false,
        }
    }
}

impl CriterionOptions {
    /// Derive criterion options from an engine configuration. Retaining
    /// zero-prescale rows also makes them eligible as signal seeds.
    pub fn from_config(config: &ClassifyConfig) -> Self {
        Self {
            check_prescales: config.check_prescales,
            ignore_zero_prescales: config.keep_zero_prescales,
            lazy: config.lazy,
        }
    }
}

/// Outcome of one criterion applied to one ordered pair of seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// The criterion has nothing to say about this pair: different seed
    /// families, ambiguous or absent attribute segments, or residual names
    /// that differ outside the compared dimension.
    NotApplicable,
    /// The criterion applies and the candidate is not a backup.
    Reject,
    /// The candidate is a backup of the named signal seed.
    BackupOf {
        signal: String,
        criterion: CriterionKind,
    },
}

impl Verdict {
    pub fn backup_of(signal: &str, criterion: CriterionKind) -> Self {
        Self::BackupOf {
            signal: signal.to_string(),
            criterion,
        }
    }

    pub fn is_backup(&self) -> bool {
        matches!(self, Self::BackupOf { .. })
    }
}

/// The criterion battery, one kind per physical dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriterionKind {
    Prescale,
    Pt,
    PtEmbedded,
    EtaRestriction,
    DrMax,
    DrMin,
    MassWindow,
    MuonQuality,
    Isolation,
}

impl CriterionKind {
    /// The full battery, in evaluation order.
    pub fn all() -> &'static [CriterionKind] {
        &[
            Self::Prescale,
            Self::Pt,
            Self::PtEmbedded,
            Self::EtaRestriction,
            Self::DrMax,
            Self::DrMin,
            Self::MassWindow,
            Self::MuonQuality,
            Self::Isolation,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Prescale => "prescale",
            Self::Pt => "pt",
            Self::PtEmbedded => "pt-embedded",
            Self::EtaRestriction => "eta-restriction",
            Self::DrMax => "dr-max",
            Self::DrMin => "dr-min",
            Self::MassWindow => "mass-window",
            Self::MuonQuality => "muon-quality",
            Self::Isolation => "isolation",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == id)
    }
}

/// Trait that every criterion implements.
///
/// A criterion is a pure function over one ordered seed pair: it compares
/// exactly one dimension, ignores pairs that differ anywhere else, and never
/// errors on malformed names.
pub trait Criterion: Send + Sync {
    /// Which dimension this criterion compares.
    fn kind(&self) -> CriterionKind;

    /// Unique identifier, used in configs and decision logs.
    fn id(&self) -> &'static str {
        self.kind().name()
    }

    /// Decide whether `candidate` is a backup of `reference`.
    fn evaluate(
        &self,
        candidate: SeedRef<'_>,
        reference: SeedRef<'_>,
        opts: &CriterionOptions,
    ) -> Verdict;
}

/// Shared preconditions applied before any dimension-specific logic.
/// Returns false when the pair is out of consideration for every criterion.
pub(crate) fn prescale_preconditions(
    candidate: SeedRef<'_>,
    reference: SeedRef<'_>,
    opts: &CriterionOptions,
) -> bool {
    if opts.check_prescales && candidate.prescale < reference.prescale {
        return false;
    }
    if !opts.ignore_zero_prescales && reference.prescale.is_disabled() {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in CriterionKind::all() {
            assert_eq!(CriterionKind::from_id(kind.name()), Some(*kind));
        }
        assert_eq!(CriterionKind::from_id("bogus"), None);
    }

    #[test]
    fn test_preconditions_prescale_ordering() {
        let opts = CriterionOptions::default();
        let low = SeedRef::new("L1_SingleMu22", Prescale::new(1));
        let high = SeedRef::new("L1_SingleMu22", Prescale::new(10));
        // a candidate cannot back up a seed with a higher prescale
        assert!(!prescale_preconditions(low, high, &opts));
        assert!(prescale_preconditions(high, low, &opts));
    }

    #[test]
    fn test_preconditions_zero_reference() {
        let opts = CriterionOptions::default();
        let cand = SeedRef::new("L1_SingleMu22", Prescale::new(10));
        let disabled = SeedRef::new("L1_SingleMu22", Prescale::DISABLED);
        assert!(!prescale_preconditions(cand, disabled, &opts));

        let opts = CriterionOptions {
            ignore_zero_prescales: true,
            ..CriterionOptions::default()
        };
        assert!(prescale_preconditions(cand, disabled, &opts));
    }
}
