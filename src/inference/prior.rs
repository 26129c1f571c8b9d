//! Ancestral sampling from the joint distribution.

use rand::Rng;

use crate::network::{Assignment, BayesNetwork, Node};

/// Draws `u` in `[0, 1)` and returns `u < P(node = true | parents)`.
pub fn sample_node<R: Rng + ?Sized>(node: &Node, assignment: &Assignment, rng: &mut R) -> bool {
    rng.r#gen::<f64>() < node.conditional_probability(assignment)
}

/// Overwrites every value in `assignment` with one draw from the joint
/// distribution, visiting nodes in topological order.
pub fn prior_sample<R: Rng + ?Sized>(network: &BayesNetwork, rng: &mut R, assignment: &mut Assignment) {
    for id in network.ids() {
        let value = sample_node(network.node(id), assignment, rng);
        assignment.set(id, value);
    }
}
