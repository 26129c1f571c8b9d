use log::trace;
use serde::Serialize;

use crate::common::errors::{BayesError, Result};

use super::assignment::Assignment;
use super::graph::BayesNetwork;
use super::node::NodeId;

/// Observed values for a subset of the network's nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evidence {
    observations: Vec<(NodeId, bool)>,
}

impl Evidence {
    pub fn none() -> Self {
        Evidence::default()
    }

    /// Pairs `indices[i]` with `values[i]`. The slices must have equal length
    /// and the indices must be distinct positions inside the network.
    pub fn new(network: &BayesNetwork, indices: &[usize], values: &[bool]) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(BayesError::EvidenceLength {
                indices: indices.len(),
                values: values.len(),
            });
        }
        let mut observations = Vec::with_capacity(indices.len());
        for (&index, &value) in indices.iter().zip(values) {
            if index >= network.len() {
                return Err(BayesError::EvidenceOutOfBounds {
                    index,
                    len: network.len(),
                });
            }
            if observations.iter().any(|(id, _)| *id == NodeId(index)) {
                return Err(BayesError::DuplicateEvidence(index));
            }
            observations.push((NodeId(index), value));
        }
        Ok(Evidence { observations })
    }

    pub fn from_names(network: &BayesNetwork, observed: &[(&str, bool)]) -> Result<Self> {
        let mut indices = Vec::with_capacity(observed.len());
        let mut values = Vec::with_capacity(observed.len());
        for (name, value) in observed {
            indices.push(network.resolve(name)?.index());
            values.push(*value);
        }
        Evidence::new(network, &indices, &values)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, bool)> {
        self.observations.iter()
    }

    pub fn value_of(&self, id: NodeId) -> Option<bool> {
        self.observations
            .iter()
            .find(|(observed, _)| *observed == id)
            .map(|(_, value)| *value)
    }

    /// Dense per-node view: `Some(value)` for observed nodes.
    pub fn mask(&self, len: usize) -> Vec<Option<bool>> {
        let mut mask = vec![None; len];
        for &(id, value) in &self.observations {
            mask[id.0] = Some(value);
        }
        mask
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.observations
            .iter()
            .all(|&(id, value)| assignment.get(id) == value)
    }

    /// `Rain = true, WetGrass = false`
    pub fn describe(&self, network: &BayesNetwork) -> String {
        self.observations
            .iter()
            .map(|&(id, value)| format!("{} = {}", network.node(id).name(), value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A validated posterior query: the target node and the evidence it is
/// conditioned on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub target: NodeId,
    pub evidence: Evidence,
}

impl Query {
    pub fn new(
        network: &BayesNetwork,
        query: usize,
        evidence_indices: &[usize],
        evidence_values: &[bool],
    ) -> Result<Self> {
        let evidence = Evidence::new(network, evidence_indices, evidence_values)?;
        Query::with_evidence(network, query, evidence)
    }

    pub fn by_name(network: &BayesNetwork, query: &str, observed: &[(&str, bool)]) -> Result<Self> {
        let target = network.resolve(query)?;
        let evidence = Evidence::from_names(network, observed)?;
        Query::with_evidence(network, target.index(), evidence)
    }

    pub fn with_evidence(network: &BayesNetwork, query: usize, evidence: Evidence) -> Result<Self> {
        if query >= network.len() {
            return Err(BayesError::QueryOutOfBounds {
                index: query,
                len: network.len(),
            });
        }
        if evidence.value_of(NodeId(query)).is_some() {
            return Err(BayesError::QueryInEvidence(query));
        }
        trace!(
            "query - target {} with {} evidence nodes",
            network.node(NodeId(query)).name(),
            evidence.len()
        );
        Ok(Query {
            target: NodeId(query),
            evidence,
        })
    }

    /// `P(Rain | WetGrass = true)`
    pub fn describe(&self, network: &BayesNetwork) -> String {
        let target = network.node(self.target).name();
        if self.evidence.is_empty() {
            format!("P({})", target)
        } else {
            format!("P({} | {})", target, self.evidence.describe(network))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> BayesNetwork {
        let mut network = BayesNetwork::new("chain");
        let a = network.add_node("A", &[], vec![0.3]).unwrap();
        let b = network.add_node("B", &[a], vec![0.8, 0.1]).unwrap();
        network.add_node("C", &[b], vec![0.5, 0.25]).unwrap();
        network
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let network = chain();
        assert!(matches!(
            Evidence::new(&network, &[0, 1], &[true]),
            Err(BayesError::EvidenceLength { indices: 2, values: 1 })
        ));
    }

    #[test]
    fn test_out_of_bounds_and_duplicates_rejected() {
        let network = chain();
        assert!(matches!(
            Evidence::new(&network, &[3], &[true]),
            Err(BayesError::EvidenceOutOfBounds { index: 3, len: 3 })
        ));
        assert!(matches!(
            Evidence::new(&network, &[1, 1], &[true, false]),
            Err(BayesError::DuplicateEvidence(1))
        ));
    }

    #[test]
    fn test_query_overlapping_evidence_rejected() {
        let network = chain();
        assert!(matches!(
            Query::new(&network, 1, &[1], &[true]),
            Err(BayesError::QueryInEvidence(1))
        ));
        assert!(matches!(
            Query::new(&network, 7, &[], &[]),
            Err(BayesError::QueryOutOfBounds { index: 7, .. })
        ));
    }

    #[test]
    fn test_named_query() {
        let network = chain();
        let query = Query::by_name(&network, "A", &[("C", true)]).unwrap();
        assert_eq!(query.target, NodeId(0));
        assert_eq!(query.evidence.value_of(NodeId(2)), Some(true));
        assert_eq!(query.evidence.mask(3), vec![None, None, Some(true)]);
        assert_eq!(query.describe(&network), "P(A | C = true)");
        assert!(Query::by_name(&network, "Missing", &[]).is_err());
    }

    #[test]
    fn test_satisfaction() {
        let network = chain();
        let evidence = Evidence::new(&network, &[0, 2], &[true, false]).unwrap();
        assert!(evidence.is_satisfied_by(&Assignment::from_values(vec![true, true, false])));
        assert!(!evidence.is_satisfied_by(&Assignment::from_values(vec![true, true, true])));
        assert!(Evidence::none().is_satisfied_by(&Assignment::new(3)));
    }
}
