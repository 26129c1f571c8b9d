//! Markov chain Monte Carlo inference by Gibbs sampling.
//!
//! The chain state is a full assignment with the evidence nodes pinned. A
//! sweep resamples every non-evidence node, in topological order, from its
//! distribution given its Markov blanket:
//!
//! ```text
//! P(X = x | mb(X)) ∝ P(X = x | parents(X)) * Π_{C in children(X)} P(c | parents(C))
//! ```
//!
//! Counting is controlled by [`CountGranularity`]. Samples are correlated and
//! the first sweeps depend on the starting state; `burn_in` discards them.

use log::{debug, trace};
use rand::Rng;

use crate::common::errors::{BayesError, Result, UndefinedReason};
use crate::network::{Assignment, BayesNetwork, NodeId, Query};

use super::cancel::CancelToken;
use super::config::{CountGranularity, SamplingConfig};
use super::likelihood::weighted_sample;
use super::tally::Tally;

pub struct GibbsChain<'a> {
    network: &'a BayesNetwork,
    free: Vec<NodeId>,
    state: Assignment,
}

impl<'a> GibbsChain<'a> {
    /// Starts the chain from a weighted sample with non-zero weight, so the
    /// initial state has positive joint probability and every later state
    /// stays inside the support of the posterior.
    pub fn initialize<R: Rng + ?Sized>(
        network: &'a BayesNetwork,
        query: &Query,
        attempts: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mask = query.evidence.mask(network.len());
        let free = network
            .ids()
            .filter(|id| mask[id.index()].is_none())
            .collect();
        let mut state = network.empty_assignment();
        for attempt in 0..attempts {
            let weight = weighted_sample(network, &mask, rng, &mut state);
            if weight > 0.0 {
                trace!("gibbs - initial state found after {} attempts", attempt + 1);
                return Ok(GibbsChain {
                    network,
                    free,
                    state,
                });
            }
        }
        debug!("gibbs - no supporting state in {} attempts", attempts);
        Err(BayesError::undefined(UndefinedReason::NoSupportingState))
    }

    pub fn state(&self) -> &Assignment {
        &self.state
    }

    /// Non-evidence nodes, in the order a sweep visits them.
    pub fn free_nodes(&self) -> &[NodeId] {
        &self.free
    }

    /// Unnormalized `P(X = value | mb(X))` with the value written into the state.
    fn blanket_score(&mut self, id: NodeId, value: bool) -> f64 {
        let network = self.network;
        self.state.set(id, value);
        let own = network.node(id).probability_of(value, &self.state);
        network.children(id).iter().fold(own, |score, &child| {
            score * network
                .node(child)
                .probability_of(self.state.get(child), &self.state)
        })
    }

    /// `P(X = true | mb(X))` under the current state, or `None` when both
    /// values have zero probability.
    pub fn blanket_probability(&mut self, id: NodeId) -> Option<f64> {
        let current = self.state.get(id);
        let when_true = self.blanket_score(id, true);
        let when_false = self.blanket_score(id, false);
        self.state.set(id, current);
        let norm = when_true + when_false;
        (norm > 0.0).then(|| when_true / norm)
    }

    pub fn resample<R: Rng + ?Sized>(&mut self, id: NodeId, rng: &mut R) {
        if let Some(p) = self.blanket_probability(id) {
            let value = rng.r#gen::<f64>() < p;
            self.state.set(id, value);
        }
    }

    /// One pass over the free nodes; `after_each` sees the state after every
    /// single-variable update.
    pub fn sweep<R, F>(&mut self, rng: &mut R, mut after_each: F)
    where
        R: Rng + ?Sized,
        F: FnMut(&Assignment),
    {
        for position in 0..self.free.len() {
            let id = self.free[position];
            self.resample(id, rng);
            after_each(&self.state);
        }
    }
}

/// Runs `burn_in` discarded sweeps followed by `sweeps` counted sweeps and
/// returns the tally of the query variable.
pub fn run_chain<R: Rng + ?Sized>(
    network: &BayesNetwork,
    query: &Query,
    sweeps: usize,
    config: &SamplingConfig,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<Tally> {
    let mut chain = GibbsChain::initialize(network, query, config.gibbs_init_attempts, rng)?;
    debug!(
        "gibbs - {} free nodes, {} burn-in sweeps, {} counted sweeps, {:?}",
        chain.free_nodes().len(),
        config.burn_in,
        sweeps,
        config.granularity
    );

    for completed in 0..config.burn_in {
        cancel.check(completed)?;
        chain.sweep(rng, |_| {});
    }

    let target = query.target;
    let mut tally = Tally::default();
    for completed in 0..sweeps {
        cancel.check(completed)?;
        match config.granularity {
            CountGranularity::PerSweep => {
                chain.sweep(rng, |_| {});
                tally.record(1.0, chain.state().get(target));
            }
            CountGranularity::PerVariable => {
                chain.sweep(rng, |state| tally.record(1.0, state.get(target)));
            }
        }
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rain_grass() -> BayesNetwork {
        let mut network = BayesNetwork::new("rain_grass");
        let a = network.add_node("A", &[], vec![0.3]).unwrap();
        network.add_node("B", &[a], vec![0.8, 0.1]).unwrap();
        network
    }

    #[test]
    fn test_blanket_probability_matches_posterior() {
        let network = rain_grass();
        let query = Query::new(&network, 0, &[1], &[true]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut chain = GibbsChain::initialize(&network, &query, 10, &mut rng).unwrap();
        let p = chain.blanket_probability(NodeId(0)).unwrap();
        let exact = (0.3 * 0.8) / (0.3 * 0.8 + 0.7 * 0.1);
        assert!((p - exact).abs() < 1e-12);
        // the state is restored after scoring
        assert!(chain.state().get(NodeId(1)));
    }

    #[test]
    fn test_free_nodes_exclude_evidence() {
        let network = rain_grass();
        let query = Query::new(&network, 0, &[1], &[false]).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let chain = GibbsChain::initialize(&network, &query, 10, &mut rng).unwrap();
        assert_eq!(chain.free_nodes(), &[NodeId(0)]);
    }

    #[test]
    fn test_impossible_evidence_has_no_starting_state() {
        let mut network = BayesNetwork::new("never");
        let a = network.add_node("A", &[], vec![0.5]).unwrap();
        network.add_node("B", &[a], vec![0.0, 0.0]).unwrap();
        let query = Query::new(&network, 0, &[1], &[true]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let err = GibbsChain::initialize(&network, &query, 50, &mut rng)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            BayesError::UndefinedEstimate {
                reason: UndefinedReason::NoSupportingState
            }
        ));
    }

    #[test]
    fn test_per_variable_counts_every_update() {
        let mut network = BayesNetwork::new("pair");
        network.add_node("A", &[], vec![0.5]).unwrap();
        network.add_node("B", &[], vec![0.5]).unwrap();
        let query = Query::new(&network, 0, &[], &[]).unwrap();
        let config = SamplingConfig {
            granularity: CountGranularity::PerVariable,
            ..SamplingConfig::seeded(4)
        };
        let mut rng = StdRng::seed_from_u64(4);
        let tally = run_chain(&network, &query, 10, &config, &CancelToken::new(), &mut rng).unwrap();
        assert_eq!(tally.total, 20.0);
    }
}
