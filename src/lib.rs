#[macro_use]
pub mod common;
pub mod estimate;
pub mod inference;
pub mod network;
pub mod scenarios;

pub use common::errors::{BayesError, Result};
pub use inference::{SamplingConfig, Sampler};
pub use network::{Assignment, BayesNetwork, Evidence, NodeId, Query};
