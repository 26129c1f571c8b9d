use crate::common::errors::Result;
use crate::common::interface::{DemoQuery, ScenarioMaker};
use crate::network::{BayesNetwork, Query};

/// Two nodes, `Rain -> WetGrass`, small enough to check by hand:
/// `P(Rain | WetGrass) = 0.24 / (0.24 + 0.07) ≈ 0.7742`.
pub struct RainGrass {}

impl ScenarioMaker for RainGrass {
    fn name(&self) -> &str {
        "rain_grass"
    }

    fn build_network(&self) -> Result<BayesNetwork> {
        let mut network = BayesNetwork::new("rain_grass");
        let rain = network.add_node("Rain", &[], vec![0.3])?;
        network.add_node("WetGrass", &[rain], vec![0.8, 0.1])?;
        Ok(network)
    }

    fn demo_queries(&self, network: &BayesNetwork) -> Result<Vec<DemoQuery>> {
        Ok(vec![DemoQuery {
            label: "P(rain | wet grass)".to_string(),
            query: Query::by_name(network, "Rain", &[("WetGrass", true)])?,
            samples: 100_000,
        }])
    }
}
