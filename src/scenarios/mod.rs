pub mod factory;
pub mod rain_grass;
pub mod wet_grass;

pub use factory::ScenarioMakerFactory;
