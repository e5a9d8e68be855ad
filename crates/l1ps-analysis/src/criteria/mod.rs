//! The backup-seed criterion battery.
//!
//! Each criterion is an independent, pure predicate over one ordered seed
//! pair, comparing exactly one physical dimension. The battery for a run is
//! assembled from configuration, so the active criteria are recorded data
//! rather than a code edit.

pub mod prescale;
pub mod pt;
pub mod pt_embedded;
pub mod quality;
pub mod restriction;
pub mod traits;

pub use restriction::{Comparator, DimensionSpec, RestrictionCriterion, Tightness, DIMENSIONS};
pub use traits::{Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};

use l1ps_core::errors::ConfigError;

use prescale::PrescaleCriterion;
use pt::PtCriterion;
use pt_embedded::PtEmbeddedCriterion;
use quality::MuonQualityCriterion;
use restriction::{
    DR_MAX_DIMENSION, DR_MIN_DIMENSION, ETA_DIMENSION, ISOLATION_DIMENSION, MASS_DIMENSION,
};

/// Instantiate the criterion for a kind.
pub fn build(kind: CriterionKind) -> Box<dyn Criterion> {
    match kind {
        CriterionKind::Prescale => Box::new(PrescaleCriterion),
        CriterionKind::Pt => Box::new(PtCriterion),
        CriterionKind::PtEmbedded => Box::new(PtEmbeddedCriterion),
        CriterionKind::EtaRestriction => Box::new(RestrictionCriterion::new(&ETA_DIMENSION)),
        CriterionKind::DrMax => Box::new(RestrictionCriterion::new(&DR_MAX_DIMENSION)),
        CriterionKind::DrMin => Box::new(RestrictionCriterion::new(&DR_MIN_DIMENSION)),
        CriterionKind::MassWindow => Box::new(RestrictionCriterion::new(&MASS_DIMENSION)),
        CriterionKind::MuonQuality => Box::new(MuonQualityCriterion),
        CriterionKind::Isolation => Box::new(RestrictionCriterion::new(&ISOLATION_DIMENSION)),
    }
}

/// The full default battery, in evaluation order.
pub fn default_battery() -> Vec<Box<dyn Criterion>> {
    CriterionKind::all().iter().map(|k| build(*k)).collect()
}

/// Assemble a battery from configured criterion ids. An empty list selects
/// the full default battery; an unknown id is a configuration error.
pub fn battery_from_ids(ids: &[String]) -> Result<Vec<Box<dyn Criterion>>, ConfigError> {
    if ids.is_empty() {
        return Ok(default_battery());
    }
    ids.iter()
        .map(|id| {
            CriterionKind::from_id(id)
                .map(build)
                .ok_or_else(|| ConfigError::UnknownCriterion { name: id.clone() })
        })
        .collect()
}
