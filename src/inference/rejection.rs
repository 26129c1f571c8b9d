//! Rejection sampling: prior samples that disagree with the evidence are
//! discarded.

use rand::Rng;

use crate::common::errors::UndefinedReason;
use crate::network::{Assignment, BayesNetwork, Query};

use super::parallel::Trial;
use super::prior::prior_sample;
use super::tally::Tally;

pub struct RejectionTrial<'a> {
    network: &'a BayesNetwork,
    query: &'a Query,
}

impl<'a> RejectionTrial<'a> {
    pub fn new(network: &'a BayesNetwork, query: &'a Query) -> Self {
        RejectionTrial { network, query }
    }
}

impl Trial for RejectionTrial<'_> {
    fn assignment_len(&self) -> usize {
        self.network.len()
    }

    fn undefined_reason(&self) -> UndefinedReason {
        UndefinedReason::NoConsistentSamples
    }

    fn run<R: Rng + ?Sized>(&self, rng: &mut R, assignment: &mut Assignment, tally: &mut Tally) {
        prior_sample(self.network, rng, assignment);
        if self.query.evidence.is_satisfied_by(assignment) {
            tally.record(1.0, assignment.get(self.query.target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::cancel::CancelToken;
    use crate::inference::parallel::run_sequential;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_impossible_evidence_records_nothing() {
        let mut network = BayesNetwork::new("never");
        let a = network.add_node("A", &[], vec![0.0]).unwrap();
        network.add_node("B", &[a], vec![0.5, 0.5]).unwrap();
        let query = Query::new(&network, 1, &[0], &[true]).unwrap();
        let trial = RejectionTrial::new(&network, &query);
        let mut rng = StdRng::seed_from_u64(11);
        let tally = run_sequential(&trial, 500, &CancelToken::new(), &mut rng).unwrap();
        assert_eq!(tally.total, 0.0);
        assert!(tally.estimate(trial.undefined_reason()).is_err());
    }
}
