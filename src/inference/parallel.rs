//! Trial runners for estimators whose trials are independent.
//!
//! Each worker owns its assignment buffer and random source, and the
//! per-worker tallies are summed at the end. Worker seeds are drawn from the
//! caller's rng before dispatch, so a seeded caller gets the same estimate
//! regardless of how rayon schedules the chunks.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::common::errors::{Result, UndefinedReason};
use crate::network::Assignment;

use super::cancel::CancelToken;
use super::config::SamplingConfig;
use super::tally::Tally;

/// One independent randomized trial of an estimator.
pub trait Trial: Sync {
    /// Number of nodes in the assignment buffer a trial writes.
    fn assignment_len(&self) -> usize;

    /// Reported when the run ends with nothing recorded.
    fn undefined_reason(&self) -> UndefinedReason;

    fn run<R: Rng + ?Sized>(&self, rng: &mut R, assignment: &mut Assignment, tally: &mut Tally);
}

pub fn run_sequential<T: Trial, R: Rng + ?Sized>(
    trial: &T,
    trials: usize,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<Tally> {
    let mut assignment = Assignment::new(trial.assignment_len());
    let mut tally = Tally::default();
    for completed in 0..trials {
        cancel.check(completed)?;
        trial.run(rng, &mut assignment, &mut tally);
    }
    Ok(tally)
}

pub fn run_parallel<T: Trial, R: Rng + ?Sized>(
    trial: &T,
    trials: usize,
    chunk_size: usize,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<Tally> {
    let chunks: Vec<(usize, u64)> = (0..trials)
        .step_by(chunk_size)
        .map(|start| (chunk_size.min(trials - start), rng.r#gen::<u64>()))
        .collect();
    debug!(
        "run_parallel - {} trials in {} chunks of up to {}",
        trials,
        chunks.len(),
        chunk_size
    );

    let tallies = chunks
        .into_par_iter()
        .map(|(size, seed)| {
            trace!("run_parallel - chunk of {} with seed {}", size, seed);
            let mut chunk_rng = StdRng::seed_from_u64(seed);
            run_sequential(trial, size, cancel, &mut chunk_rng)
        })
        .collect::<Result<Vec<Tally>>>()?;

    Ok(tallies.into_iter().fold(Tally::default(), Tally::merge))
}

/// Runs `trials` trials sequentially or on the rayon pool, as configured.
pub fn run_trials<T: Trial, R: Rng + ?Sized>(
    trial: &T,
    trials: usize,
    config: &SamplingConfig,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<Tally> {
    if config.parallel {
        run_parallel(trial, trials, config.chunk_size, cancel, rng)
    } else {
        run_sequential(trial, trials, cancel, rng)
    }
}
