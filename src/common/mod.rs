pub mod errors;
pub mod interface;
#[macro_use]
pub mod logging;
pub mod report;
pub mod setup;

pub use errors::{BayesError, Result, UndefinedReason};
pub use interface::{DemoQuery, ScenarioMaker};
pub use report::{EstimateRecord, InferenceReport};
