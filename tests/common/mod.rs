#![allow(dead_code)]

use bayesnet::network::{Assignment, BayesNetwork, Query};

/// Exact `P(target = true | evidence)` by summing the joint over every
/// assignment. Only usable for a handful of nodes.
pub fn exact_posterior(network: &BayesNetwork, query: &Query) -> f64 {
    let n = network.len();
    let mut hits = 0.0;
    let mut total = 0.0;
    for bits in 0..1usize << n {
        let assignment = Assignment::from_values((0..n).map(|i| bits & (1 << i) != 0).collect());
        if !query.evidence.is_satisfied_by(&assignment) {
            continue;
        }
        let p = network.joint_probability(&assignment);
        total += p;
        if assignment.get(query.target) {
            hits += p;
        }
    }
    hits / total
}

/// `Rain -> WetGrass` with P(Rain) = 0.3, P(W | R) = 0.8, P(W | ~R) = 0.1.
pub fn rain_grass() -> BayesNetwork {
    let mut network = BayesNetwork::new("rain_grass");
    let rain = network.add_node("Rain", &[], vec![0.3]).unwrap();
    network.add_node("WetGrass", &[rain], vec![0.8, 0.1]).unwrap();
    network
}

/// Cloudy -> {Sprinkler, Rain} -> WetGrass, with no deterministic entries.
pub fn sprinkler() -> BayesNetwork {
    let mut network = BayesNetwork::new("sprinkler");
    let cloudy = network.add_node("Cloudy", &[], vec![0.5]).unwrap();
    let sprinkler = network.add_node("Sprinkler", &[cloudy], vec![0.1, 0.5]).unwrap();
    let rain = network.add_node("Rain", &[cloudy], vec![0.8, 0.2]).unwrap();
    network
        .add_node("WetGrass", &[sprinkler, rain], vec![0.99, 0.9, 0.9, 0.05])
        .unwrap();
    network
}

pub fn mean_and_sd(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}
