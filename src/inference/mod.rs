pub mod cancel;
pub mod config;
pub mod gibbs;
pub mod likelihood;
pub mod parallel;
pub mod prior;
pub mod rejection;
pub mod sampler;
pub mod tally;

pub use cancel::CancelToken;
pub use config::{CountGranularity, InferenceMethod, SamplingConfig};
pub use sampler::Sampler;
pub use tally::Tally;
