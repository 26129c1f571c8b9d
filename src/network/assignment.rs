use serde::Serialize;
use std::ops::Index;

use super::node::NodeId;

/// One boolean value per network node, indexed by [`NodeId`].
///
/// Sampling procedures write into an assignment owned by the caller instead
/// of mutating the nodes, so concurrent trials never share state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// All-false assignment over `len` nodes.
    pub fn new(len: usize) -> Self {
        Assignment {
            values: vec![false; len],
        }
    }

    pub fn from_values(values: Vec<bool>) -> Self {
        Assignment { values }
    }

    pub fn get(&self, id: NodeId) -> bool {
        self.values[id.0]
    }

    pub fn set(&mut self, id: NodeId, value: bool) {
        self.values[id.0] = value;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn into_values(self) -> Vec<bool> {
        self.values
    }
}

impl Index<NodeId> for Assignment {
    type Output = bool;

    fn index(&self, id: NodeId) -> &bool {
        &self.values[id.0]
    }
}
