use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::errors::{BayesError, Result};

use super::graph::BayesNetwork;

/// Serializable description of a network. Parents are referenced by name
/// and must be declared earlier in `nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    #[serde(default)]
    pub parents: Vec<String>,
    pub cpt: Vec<f64>,
}

impl NetworkSpec {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl BayesNetwork {
    /// Builds a network from a spec, validating every node as it is added.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Self> {
        let mut network = BayesNetwork::new(&spec.name);
        for node in &spec.nodes {
            let parents = node
                .parents
                .iter()
                .map(|parent| {
                    network.node_id(parent).ok_or_else(|| BayesError::UnknownParent {
                        node: node.name.clone(),
                        parent: parent.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            network.add_node(&node.name, &parents, node.cpt.clone())?;
        }
        info!(
            "Loaded network '{}' with {} nodes",
            network.name(),
            network.len()
        );
        Ok(network)
    }

    pub fn to_spec(&self) -> NetworkSpec {
        NetworkSpec {
            name: self.name().to_string(),
            nodes: self
                .nodes()
                .iter()
                .map(|node| NodeSpec {
                    name: node.name().to_string(),
                    parents: node
                        .parents()
                        .iter()
                        .map(|parent| self.node(*parent).name().to_string())
                        .collect(),
                    cpt: node.cpt().to_vec(),
                })
                .collect(),
        }
    }
}
