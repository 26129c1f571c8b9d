use std::rc::Rc;

use crate::common::errors::{BayesError, Result};
use crate::common::interface::ScenarioMaker;

use super::{rain_grass::RainGrass, wet_grass::WetGrass};

pub struct ScenarioMakerFactory;

impl ScenarioMakerFactory {
    pub const NAMES: [&'static str; 2] = ["wet_grass", "rain_grass"];

    pub fn new_shared(name: &str) -> Result<Rc<dyn ScenarioMaker>> {
        match name {
            "wet_grass" => Ok(Rc::new(WetGrass {})),
            "rain_grass" => Ok(Rc::new(RainGrass {})),
            _ => Err(BayesError::InvalidConfig(format!(
                "unknown scenario '{}', expected one of {:?}",
                name,
                Self::NAMES
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_builds() {
        for name in ScenarioMakerFactory::NAMES {
            let scenario = ScenarioMakerFactory::new_shared(name).unwrap();
            assert_eq!(scenario.name(), name);
            let network = scenario.build_network().unwrap();
            assert!(!scenario.demo_queries(&network).unwrap().is_empty());
        }
        assert!(ScenarioMakerFactory::new_shared("dating_simple").is_err());
    }
}
