//! Prescale criterion: the same seed at a higher prescale backs up the
//! lower-prescale instance.

use super::traits::{prescale_preconditions, Criterion, CriterionKind, CriterionOptions, SeedRef, Verdict};

pub struct PrescaleCriterion;

impl Criterion for PrescaleCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Prescale
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
        if candidate.name != reference.name {
            return Verdict::NotApplicable;
        }
        if candidate.prescale > reference.prescale {
            Verdict::backup_of(reference.name, self.kind())
        } else {
            Verdict::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l1ps_core::types::Prescale;

    fn eval(cand_ps: u64, ref_ps: u64) -> Verdict {
        PrescaleCriterion.evaluate(
            SeedRef::new("L1_SingleMu22", Prescale::new(cand_ps)),
            SeedRef::new("L1_SingleMu22", Prescale::new(ref_ps)),
            &CriterionOptions::default(),
        )
    }

    #[test]
    fn test_higher_prescale_backs_up_lower() {
        assert!(eval(10, 1).is_backup());
        assert_eq!(eval(1, 1), Verdict::Reject);
    }

    #[test]
    fn test_different_names_not_applicable() {
        let verdict = PrescaleCriterion.evaluate(
            SeedRef::new("L1_SingleMu22", Prescale::new(10)),
            SeedRef::new("L1_SingleMu25", Prescale::new(1)),
            &CriterionOptions::default(),
        );
        assert_eq!(verdict, Verdict::NotApplicable);
    }

    #[test]
    fn test_zero_reference_not_applicable() {
        assert_eq!(eval(10, 0), Verdict::NotApplicable);
    }
}
