use log::{debug, info};
use rand::Rng;
use std::time::{Duration, Instant};

use crate::common::errors::{BayesError, Result, UndefinedReason};
use crate::network::{Assignment, BayesNetwork, Evidence, Query};

use super::cancel::CancelToken;
use super::config::{InferenceMethod, SamplingConfig};
use super::gibbs::run_chain;
use super::likelihood::{LikelihoodTrial, weighted_sample};
use super::parallel::{Trial, run_trials};
use super::prior::prior_sample;
use super::rejection::RejectionTrial;

/// Entry point for sampling-based inference over one network.
///
/// The sampler never mutates the network: each call works in its own
/// [`Assignment`] buffers and takes the random source as a parameter.
pub struct Sampler<'a> {
    network: &'a BayesNetwork,
    config: SamplingConfig,
    cancel: CancelToken,
}

impl<'a> Sampler<'a> {
    pub fn new(network: &'a BayesNetwork, config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Sampler {
            network,
            config,
            cancel: CancelToken::new(),
        })
    }

    /// Uses `token` to stop long runs from another thread.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn network(&self) -> &BayesNetwork {
        self.network
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Token for one call; `timeout_ms` counts from the start of the call.
    fn call_token(&self) -> CancelToken {
        match self.config.timeout_ms {
            Some(ms) => self.cancel.with_timeout(Duration::from_millis(ms)),
            None => self.cancel.clone(),
        }
    }

    /// One draw from the joint distribution.
    pub fn prior_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Assignment {
        let mut assignment = self.network.empty_assignment();
        prior_sample(self.network, rng, &mut assignment);
        assignment
    }

    /// One likelihood-weighted draw: the weight and the assignment it belongs to.
    pub fn weighted_sample<R: Rng + ?Sized>(
        &self,
        evidence_indices: &[usize],
        evidence_values: &[bool],
        rng: &mut R,
    ) -> Result<(f64, Assignment)> {
        let evidence = Evidence::new(self.network, evidence_indices, evidence_values)?;
        let mut assignment = self.network.empty_assignment();
        let weight = weighted_sample(
            self.network,
            &evidence.mask(self.network.len()),
            rng,
            &mut assignment,
        );
        Ok((weight, assignment))
    }

    /// Estimates `P(query = true | evidence)` by rejection sampling over `n`
    /// prior samples.
    pub fn rejection_sampling<R: Rng + ?Sized>(
        &self,
        query: usize,
        evidence_indices: &[usize],
        evidence_values: &[bool],
        n: usize,
        rng: &mut R,
    ) -> Result<f64> {
        let query = Query::new(self.network, query, evidence_indices, evidence_values)?;
        self.estimate(InferenceMethod::Rejection, &query, n, rng)
    }

    /// Estimates `P(query = true | evidence)` from `n` weighted samples.
    pub fn likelihood_weighting<R: Rng + ?Sized>(
        &self,
        query: usize,
        evidence_indices: &[usize],
        evidence_values: &[bool],
        n: usize,
        rng: &mut R,
    ) -> Result<f64> {
        let query = Query::new(self.network, query, evidence_indices, evidence_values)?;
        self.estimate(InferenceMethod::LikelihoodWeighting, &query, n, rng)
    }

    /// Estimates `P(query = true | evidence)` from `n` Gibbs sweeps.
    pub fn mcmc_ask<R: Rng + ?Sized>(
        &self,
        query: usize,
        evidence_indices: &[usize],
        evidence_values: &[bool],
        n: usize,
        rng: &mut R,
    ) -> Result<f64> {
        let query = Query::new(self.network, query, evidence_indices, evidence_values)?;
        self.estimate(InferenceMethod::Mcmc, &query, n, rng)
    }

    /// Runs `method` for an already validated query.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        method: InferenceMethod,
        query: &Query,
        n: usize,
        rng: &mut R,
    ) -> Result<f64> {
        if n == 0 {
            return Err(BayesError::ZeroTrials);
        }
        let started = Instant::now();
        let cancel = self.call_token();
        debug!(
            "{} - {} with n = {} (parallel: {})",
            method,
            query.describe(self.network),
            n,
            self.config.parallel
        );

        let estimate = match method {
            InferenceMethod::Rejection => {
                self.run_independent(&RejectionTrial::new(self.network, query), n, &cancel, rng)
            }
            InferenceMethod::LikelihoodWeighting => {
                self.run_independent(&LikelihoodTrial::new(self.network, query), n, &cancel, rng)
            }
            InferenceMethod::Mcmc => run_chain(self.network, query, n, &self.config, &cancel, rng)
                .and_then(|tally| tally.estimate(UndefinedReason::NoSupportingState)),
        }?;

        info!(
            "{} {} = {:.5} ({} samples, {} ms)",
            method,
            query.describe(self.network),
            estimate,
            n,
            started.elapsed().as_millis()
        );
        Ok(estimate)
    }

    fn run_independent<T: Trial, R: Rng + ?Sized>(
        &self,
        trial: &T,
        n: usize,
        cancel: &CancelToken,
        rng: &mut R,
    ) -> Result<f64> {
        let tally = run_trials(trial, n, &self.config, cancel, rng)?;
        debug!("tally - hits {:.4}, total {:.4}", tally.hits, tally.total);
        tally.estimate(trial.undefined_reason())
    }
}
