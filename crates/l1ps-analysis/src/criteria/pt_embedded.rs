//! Embedded transverse-momentum threshold criterion.
//!
//! Some thresholds are not positional but live inside a compound token:
//! `EG40`, `HTT200`, `Tau50`, `Mass_Min400`. Two names are comparable when
//! their underscore token lists agree everywhere except a single token pair
//! of the form `<prefix><number><suffix>` with equal prefix and suffix.
//! The numeric-dominance rule then applies to that one value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::seed::segments::ETA_RESTRICTION;
use crate::seed::{basename, parse_decimal};

use super::traits::{prescale_preconditions, Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};

/// A compound token: literal prefix, embedded number, literal suffix.
static EMBEDDED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+?)(\d+(?:p\d+)?)([A-Za-z0-9]*)$").unwrap());

/// A token pair this criterion may compare as thresholds.
fn comparable(cand_token: &str, ref_token: &str) -> Option<(f64, f64)> {
    let cand = EMBEDDED_TOKEN.captures(cand_token)?;
    let reference = EMBEDDED_TOKEN.captures(ref_token)?;
    if cand.get(1)?.as_str() != reference.get(1)?.as_str()
        || cand.get(3)?.as_str() != reference.get(3)?.as_str()
    {
        return None;
    }
    // upper-bound attributes (eta restrictions, *Max cuts) tighten downward;
    // they belong to their own criteria, never to threshold dominance
    if cand.get(1)?.as_str().ends_with("Max") {
        return None;
    }
    for token in [cand_token, ref_token] {
        if ETA_RESTRICTION.find(token).map(|m| m.as_str().len()) == Some(token.len()) {
            return None;
        }
    }
    Some((
        parse_decimal(cand.get(2)?.as_str())?,
        parse_decimal(reference.get(2)?.as_str())?,
    ))
}

pub struct PtEmbeddedCriterion;

impl Criterion for PtEmbeddedCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::PtEmbedded
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

        let cand_tokens: Vec<&str> = candidate.name.split('_').collect();
        let ref_tokens: Vec<&str> = reference.name.split('_').collect();
        if cand_tokens.len() != ref_tokens.len() {
            return Verdict::NotApplicable;
        }

        let differing: Vec<usize> = (0..cand_tokens.len())
            .filter(|&i| cand_tokens[i] != ref_tokens[i])
            .collect();
        if differing.is_empty() {
            return Verdict::NotApplicable;
        }

        // exactly one embedded value is compared; without the lazy option the
        // names must agree everywhere else
        let pair = if opts.lazy {
            differing
                .iter()
                .find_map(|&i| comparable(cand_tokens[i], ref_tokens[i]))
        } else {
            match differing.as_slice() {
                [i] => comparable(cand_tokens[*i], ref_tokens[*i]),
                _ => None,
            }
        };
        let Some((cand_val, ref_val)) = pair else {
            return Verdict::NotApplicable;
        };

        if cand_val > ref_val {
            Verdict::backup_of(reference.name, self.kind())
        } else {
            Verdict::Reject
        }
    }
}
