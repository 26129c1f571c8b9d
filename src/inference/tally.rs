use crate::common::errors::{BayesError, Result, UndefinedReason};

/// Running counters of one estimation run: weight where the query was true,
/// and total weight. Unweighted procedures record a weight of 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub hits: f64,
    pub total: f64,
}

impl Tally {
    pub fn record(&mut self, weight: f64, query_true: bool) {
        self.total += weight;
        if query_true {
            self.hits += weight;
        }
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            hits: self.hits + other.hits,
            total: self.total + other.total,
        }
    }

    /// `hits / total`, or the undefined-estimate error when nothing was
    /// recorded.
    pub fn estimate(&self, reason: UndefinedReason) -> Result<f64> {
        if self.total > 0.0 {
            Ok(self.hits / self.total)
        } else {
            Err(BayesError::undefined(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally_is_undefined() {
        let err = Tally::default()
            .estimate(UndefinedReason::NoConsistentSamples)
            .unwrap_err();
        assert!(err.is_undefined_estimate());
    }

    #[test]
    fn test_zero_hits_is_zero() {
        let mut tally = Tally::default();
        tally.record(1.0, false);
        assert_eq!(tally.estimate(UndefinedReason::ZeroTotalWeight).unwrap(), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut a = Tally::default();
        a.record(0.5, true);
        let mut b = Tally::default();
        b.record(1.5, false);
        let merged = a.merge(b);
        assert_eq!(merged.estimate(UndefinedReason::ZeroTotalWeight).unwrap(), 0.25);
    }
}
