use log::info;

use crate::common::errors::Result;
use crate::common::interface::{DemoQuery, ScenarioMaker};
use crate::estimate::conditional_frequency;
use crate::network::{BayesNetwork, Query};

/// Observations of `(raining, playing outside)`.
pub const PLAYING_EXAMPLES: [(bool, bool); 13] = [
    (true, false),
    (true, false),
    (true, true),
    (true, false),
    (true, false),
    (false, true),
    (false, false),
    (false, true),
    (false, true),
    (false, true),
    (false, false),
    (false, true),
    (false, true),
];

pub const CLOUDY: usize = 0;
pub const DROUGHT: usize = 1;
pub const SPRINKLER: usize = 2;
pub const RAIN: usize = 3;
pub const PLAY_OUTSIDE: usize = 4;
pub const WET_GRASS: usize = 5;

/// The Wet Grass network:
///
/// ```text
/// Cloudy   Drought
///   |  \     /
///   |  Sprinkler
///  Rain     |
///   |  \    |
///   |   WetGrass
/// PlayOutside
/// ```
///
/// PlayOutside's table is estimated from [`PLAYING_EXAMPLES`].
pub struct WetGrass {}

impl ScenarioMaker for WetGrass {
    fn name(&self) -> &str {
        "wet_grass"
    }

    fn build_network(&self) -> Result<BayesNetwork> {
        let play_outside = conditional_frequency(&PLAYING_EXAMPLES)?;
        info!(
            "PlayOutside CPT from {} examples: {:?}",
            PLAYING_EXAMPLES.len(),
            play_outside
        );

        let mut network = BayesNetwork::new("wet_grass");
        let cloudy = network.add_node("Cloudy", &[], vec![0.4])?;
        let drought = network.add_node("Drought", &[], vec![0.002])?;
        let sprinkler = network.add_node("Sprinkler", &[cloudy, drought], vec![0.02, 0.1, 0.15, 0.5])?;
        let rain = network.add_node("Rain", &[cloudy], vec![0.8, 0.1])?;
        network.add_node("PlayOutside", &[rain], play_outside.to_vec())?;
        network.add_node("WetGrass", &[sprinkler, rain], vec![0.99, 0.9, 0.9, 0.0])?;
        Ok(network)
    }

    fn demo_queries(&self, network: &BayesNetwork) -> Result<Vec<DemoQuery>> {
        Ok(vec![
            DemoQuery {
                label: "P(rain | wet grass, ~playing outside)".to_string(),
                query: Query::new(network, RAIN, &[PLAY_OUTSIDE, WET_GRASS], &[false, true])?,
                samples: 10_000,
            },
            DemoQuery {
                label: "P(sprinklers | drought)".to_string(),
                query: Query::new(network, SPRINKLER, &[DROUGHT], &[true])?,
                samples: 100_000,
            },
            DemoQuery {
                label: "P(wet grass | rain, sprinklers)".to_string(),
                query: Query::new(network, WET_GRASS, &[SPRINKLER, RAIN], &[true, true])?,
                samples: 10_000_000,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NodeId;

    #[test]
    fn test_layout_matches_constants() {
        let network = WetGrass {}.build_network().unwrap();
        assert_eq!(network.len(), 6);
        assert_eq!(network.resolve("Cloudy").unwrap(), NodeId(CLOUDY));
        assert_eq!(network.resolve("Rain").unwrap(), NodeId(RAIN));
        assert_eq!(network.resolve("WetGrass").unwrap(), NodeId(WET_GRASS));
        assert_eq!(network.node(NodeId(SPRINKLER)).parents(), &[NodeId(CLOUDY), NodeId(DROUGHT)]);
    }

    #[test]
    fn test_play_outside_table_from_examples() {
        let network = WetGrass {}.build_network().unwrap();
        let cpt = network.node(NodeId(PLAY_OUTSIDE)).cpt();
        // 1 of 5 rainy examples, 6 of 8 dry examples
        assert!((cpt[0] - 0.2).abs() < 1e-12);
        assert!((cpt[1] - 0.75).abs() < 1e-12);
    }
}
