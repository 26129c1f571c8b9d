use clap::ValueEnum;
use rand::SeedableRng;
use rand::rngs::{OsRng, StdRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::common::errors::{BayesError, Result};

/// Approximate inference procedures offered by the sampler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum InferenceMethod {
    #[serde(rename = "rejection")]
    #[value(name = "rejection")]
    Rejection,

    #[serde(rename = "likelihood")]
    #[value(name = "likelihood")]
    LikelihoodWeighting,

    /// Gibbs sampling over Markov blankets.
    #[serde(rename = "mcmc")]
    #[value(name = "mcmc")]
    Mcmc,
}

impl InferenceMethod {
    pub const ALL: [InferenceMethod; 3] = [
        InferenceMethod::Rejection,
        InferenceMethod::LikelihoodWeighting,
        InferenceMethod::Mcmc,
    ];
}

impl fmt::Display for InferenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceMethod::Rejection => write!(f, "Rejection Sampling"),
            InferenceMethod::LikelihoodWeighting => write!(f, "Likelihood Weighting"),
            InferenceMethod::Mcmc => write!(f, "MCMC"),
        }
    }
}

/// When the Gibbs sampler records the query variable.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum CountGranularity {
    /// Once after every full pass over the non-evidence nodes.
    #[default]
    #[serde(rename = "sweep")]
    #[value(name = "sweep")]
    PerSweep,

    /// After every single-variable resample.
    #[serde(rename = "variable")]
    #[value(name = "variable")]
    PerVariable,
}

/// Tunables shared by all sampling procedures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Seed for reproducible runs. `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Run rejection and likelihood-weighting trials on the rayon pool.
    pub parallel: bool,
    /// Trials per parallel job.
    pub chunk_size: usize,
    /// Gibbs sweeps discarded before counting starts.
    pub burn_in: usize,
    pub granularity: CountGranularity,
    /// Weighted draws tried when looking for a Gibbs starting state.
    pub gibbs_init_attempts: usize,
    /// Wall-clock budget per inference call.
    pub timeout_ms: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            seed: None,
            parallel: false,
            chunk_size: 4096,
            burn_in: 0,
            granularity: CountGranularity::PerSweep,
            gibbs_init_attempts: 1000,
            timeout_ms: None,
        }
    }
}

impl SamplingConfig {
    pub fn seeded(seed: u64) -> Self {
        SamplingConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(BayesError::InvalidConfig("chunk_size must be positive".to_string()));
        }
        if self.gibbs_init_attempts == 0 {
            return Err(BayesError::InvalidConfig(
                "gibbs_init_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: SamplingConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Random source for a run: seeded when `seed` is set, otherwise drawn
    /// from the operating system. Failing to reach the OS source is fatal.
    pub fn rng(&self) -> Result<StdRng> {
        match self.seed {
            Some(seed) => Ok(StdRng::seed_from_u64(seed)),
            None => StdRng::from_rng(OsRng).map_err(|e| BayesError::RandomSource(e.to_string())),
        }
    }
}
