use crate::common::errors::Result;
use crate::network::{BayesNetwork, Query};

/// A query the driver runs when the user does not ask for one.
#[derive(Debug, Clone)]
pub struct DemoQuery {
    pub label: String,
    pub query: Query,
    pub samples: usize,
}

/// Builds one of the fixed example networks.
pub trait ScenarioMaker {
    fn name(&self) -> &str;

    fn build_network(&self) -> Result<BayesNetwork>;

    /// Example queries against the network returned by `build_network`.
    fn demo_queries(&self, _network: &BayesNetwork) -> Result<Vec<DemoQuery>> {
        Ok(Vec::new())
    }
}
