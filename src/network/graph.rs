use log::trace;
use std::collections::HashMap;

use crate::common::errors::{BayesError, Result};

use super::assignment::Assignment;
use super::node::{Node, NodeId};

/// A discrete Bayesian network over binary variables.
///
/// Nodes are stored in insertion order and a node may only name parents
/// that were inserted before it, so the stored order is always a valid
/// topological order and the graph cannot contain cycles.
#[derive(Debug, Clone)]
pub struct BayesNetwork {
    name: String,
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    children: Vec<Vec<NodeId>>,
}

impl BayesNetwork {
    pub fn new(name: &str) -> Self {
        BayesNetwork {
            name: name.to_string(),
            nodes: Vec::new(),
            index: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Appends a node and returns its id.
    pub fn add_node(&mut self, name: &str, parents: &[NodeId], cpt: Vec<f64>) -> Result<NodeId> {
        if name.is_empty() {
            return Err(BayesError::InvalidConfig("node names must not be empty".to_string()));
        }
        if self.index.contains_key(name) {
            return Err(BayesError::DuplicateNode(name.to_string()));
        }
        for (position, parent) in parents.iter().enumerate() {
            if parent.0 >= self.nodes.len() {
                return Err(BayesError::UnknownParent {
                    node: name.to_string(),
                    parent: parent.to_string(),
                });
            }
            if parents[..position].contains(parent) {
                return Err(BayesError::DuplicateParent {
                    node: name.to_string(),
                    parent: self.nodes[parent.0].name().to_string(),
                });
            }
        }

        let node = Node::new(name, parents.to_vec(), cpt)?;
        let id = NodeId(self.nodes.len());
        for parent in parents {
            self.children[parent.0].push(id);
        }
        trace!("add_node - {} as {} with parents {:?}", name, id, parents);
        self.index.insert(name.to_string(), id);
        self.nodes.push(node);
        self.children.push(Vec::new());
        Ok(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Node ids in topological order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.node_id(name)
            .ok_or_else(|| BayesError::UnknownNode(name.to_string()))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    /// Parents, children and the children's other parents of `id`, sorted.
    pub fn markov_blanket(&self, id: NodeId) -> Vec<NodeId> {
        let mut blanket: Vec<NodeId> = self.node(id).parents().to_vec();
        for &child in self.children(id) {
            blanket.push(child);
            blanket.extend(self.node(child).parents().iter().filter(|p| **p != id));
        }
        blanket.sort();
        blanket.dedup();
        blanket
    }

    pub fn empty_assignment(&self) -> Assignment {
        Assignment::new(self.nodes.len())
    }

    /// Product of every node's CPT term under a full assignment.
    pub fn joint_probability(&self, assignment: &Assignment) -> f64 {
        self.ids()
            .map(|id| self.node(id).probability_of(assignment.get(id), assignment))
            .product()
    }

    /// `Cloudy = true, Drought = false, ...`
    pub fn render_assignment(&self, assignment: &Assignment) -> String {
        self.nodes
            .iter()
            .zip(assignment.values())
            .map(|(node, value)| format!("{} = {}", node.name(), value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
