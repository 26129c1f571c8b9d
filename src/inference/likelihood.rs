//! Likelihood weighting: evidence nodes are pinned and every trial is
//! weighted by the likelihood of the evidence under the sampled values.

use rand::Rng;

use crate::common::errors::UndefinedReason;
use crate::network::{Assignment, BayesNetwork, Query};

use super::parallel::Trial;
use super::prior::sample_node;
use super::tally::Tally;

/// Samples non-evidence nodes ancestrally and pins evidence nodes to their
/// observed values, multiplying the returned weight by `P(observed | parents)`
/// for each pinned node.
///
/// `evidence` is the dense mask from [`crate::network::Evidence::mask`].
pub fn weighted_sample<R: Rng + ?Sized>(
    network: &BayesNetwork,
    evidence: &[Option<bool>],
    rng: &mut R,
    assignment: &mut Assignment,
) -> f64 {
    let mut weight = 1.0;
    for id in network.ids() {
        let node = network.node(id);
        match evidence[id.index()] {
            Some(observed) => {
                assignment.set(id, observed);
                weight *= node.probability_of(observed, assignment);
            }
            None => {
                let value = sample_node(node, assignment, rng);
                assignment.set(id, value);
            }
        }
    }
    weight
}

pub struct LikelihoodTrial<'a> {
    network: &'a BayesNetwork,
    query: &'a Query,
    mask: Vec<Option<bool>>,
}

impl<'a> LikelihoodTrial<'a> {
    pub fn new(network: &'a BayesNetwork, query: &'a Query) -> Self {
        LikelihoodTrial {
            network,
            query,
            mask: query.evidence.mask(network.len()),
        }
    }
}

impl Trial for LikelihoodTrial<'_> {
    fn assignment_len(&self) -> usize {
        self.network.len()
    }

    fn undefined_reason(&self) -> UndefinedReason {
        UndefinedReason::ZeroTotalWeight
    }

    fn run<R: Rng + ?Sized>(&self, rng: &mut R, assignment: &mut Assignment, tally: &mut Tally) {
        let weight = weighted_sample(self.network, &self.mask, rng, assignment);
        tally.record(weight, assignment.get(self.query.target));
    }
}
