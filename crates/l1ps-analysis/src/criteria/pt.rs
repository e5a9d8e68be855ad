//! Positional transverse-momentum threshold criterion.
//!
//! The thresholds of a seed are the numeric tokens directly following its
//! basename: one per trigger object, or a single value applying to all
//! objects of the seed. `L1_DoubleJet90_120` carries (90, 120);
//! `L1_DoubleJet100` carries (100, 100).
//!
//! A candidate backs up a reference when every candidate threshold is at
//! least the respective reference threshold and at least one is strictly
//! above it. Mixed dominance is a rejection, not a backup.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::seed::{basename, parse_decimal, MultiplicityClass};

use super::traits::{prescale_preconditions, Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};

/// First threshold, attached to the basename (optionally after a `_`).
static LEADING_THRESHOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_?\d+(?:p\d+)?").unwrap());

/// Subsequent thresholds: a full `_<number>` token.
static FOLLOWING_THRESHOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_(\d+(?:p\d+)?)").unwrap());

type Thresholds = SmallVec<[f64; 4]>;

/// Extract the positional thresholds of `name` and the residual name with
/// the threshold tokens removed. `None` when the name does not start with
/// the expected basename or carries no leading threshold.
fn thresholds(name: &str, base: &str) -> Option<(Thresholds, String)> {
    let rest = name.strip_prefix(base)?;
    let lead = LEADING_THRESHOLD.find(rest)?;
    let mut values: Thresholds = SmallVec::new();
    values.push(parse_decimal(lead.as_str())?);

    let mut tail = &rest[lead.end()..];
    while let Some(caps) = FOLLOWING_THRESHOLD.captures(tail) {
        let token = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let consumed = 1 + token.len();
        // the token must span to the next delimiter or the end of the name
        match tail.as_bytes().get(consumed) {
            None | Some(b'_') => {}
            _ => break,
        }
        values.push(parse_decimal(token)?);
        tail = &tail[consumed..];
    }

    Some((values, format!("{base}{tail}")))
}

/// Expand a single-threshold shape to one value per trigger object.
fn expand(values: &Thresholds, count: usize) -> Thresholds {
    if values.len() == 1 {
        std::iter::repeat(values[0]).take(count).collect()
    } else {
        values.clone()
    }
}

pub struct PtCriterion;

impl Criterion for PtCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Pt
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

        let (Some(cand_base), Some(ref_base)) =
            (basename(candidate.name), basename(reference.name))
        else {
            return Verdict::NotApplicable;
        };
        if cand_base != ref_base {
            return Verdict::NotApplicable;
        }

        let Some((cand_vals, cand_residual)) = thresholds(candidate.name, &cand_base) else {
            return Verdict::NotApplicable;
        };
        let Some((ref_vals, ref_residual)) = thresholds(reference.name, &ref_base) else {
            return Verdict::NotApplicable;
        };

        // only two shapes are allowed: one threshold per object, or exactly
        // one threshold applying to every object
        let count = MultiplicityClass::of_basename(&cand_base).object_count();
        for vals in [&cand_vals, &ref_vals] {
            if vals.len() != count && vals.len() != 1 {
                return Verdict::NotApplicable;
            }
        }

        if !opts.lazy && cand_residual != ref_residual {
            return Verdict::NotApplicable;
        }

        let cand_vals = expand(&cand_vals, count);
        let ref_vals = expand(&ref_vals, count);

        let dominates = cand_vals
            .iter()
            .zip(ref_vals.iter())
            .all(|(c, r)| c >= r);
        let strictly = cand_vals
            .iter()
            .zip(ref_vals.iter())
            .any(|(c, r)| c > r);

        if dominates && strictly {
            Verdict::backup_of(reference.name, self.kind())
        } else {
            Verdict::Reject
        }
    }
}
