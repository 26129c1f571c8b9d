//! Parameter estimation for a single binary-parent CPT by frequency counting.

use log::trace;

use crate::common::errors::{BayesError, Result, UndefinedReason};

/// Outcome counts split by the value of the observed condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionalCounts {
    /// `[condition true, condition false]`
    pub outcome_true: [usize; 2],
    pub total: [usize; 2],
}

impl ConditionalCounts {
    pub fn from_examples(examples: &[(bool, bool)]) -> Self {
        let mut counts = ConditionalCounts::default();
        for &(condition, outcome) in examples {
            let slot = if condition { 0 } else { 1 };
            counts.total[slot] += 1;
            if outcome {
                counts.outcome_true[slot] += 1;
            }
        }
        counts
    }

    /// `[P(outcome | condition), P(outcome | ¬condition)]`, which is also the
    /// CPT of a node whose single parent is the condition.
    pub fn probabilities(&self) -> Result<[f64; 2]> {
        let mut probabilities = [0.0; 2];
        for (slot, condition) in [(0, true), (1, false)] {
            if self.total[slot] == 0 {
                return Err(BayesError::undefined(UndefinedReason::ConditionNeverObserved(
                    condition,
                )));
            }
            probabilities[slot] = self.outcome_true[slot] as f64 / self.total[slot] as f64;
        }
        trace!("conditional_frequency - {:?} -> {:?}", self, probabilities);
        Ok(probabilities)
    }
}

/// Estimates `[P(outcome | condition), P(outcome | ¬condition)]` from
/// `(condition, outcome)` examples.
pub fn conditional_frequency(examples: &[(bool, bool)]) -> Result<[f64; 2]> {
    ConditionalCounts::from_examples(examples).probabilities()
}
