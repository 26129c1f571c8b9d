use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::errors::{BayesError, Result};

use super::assignment::Assignment;

/// Position of a node in its network. Parents always have smaller ids than
/// their children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A binary random variable together with its conditional probability table.
///
/// `cpt[i]` is `P(node = true | parents)` where bit `k-1-j` of `i` is set
/// when parent `j` is **false**. All-true parents select entry 0 and
/// all-false parents select the last entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    name: String,
    parents: Vec<NodeId>,
    cpt: Vec<f64>,
}

impl Node {
    /// Validates the table size and range. Parent existence is checked by
    /// the owning network.
    pub(crate) fn new(name: &str, parents: Vec<NodeId>, cpt: Vec<f64>) -> Result<Node> {
        let expected = 1usize.checked_shl(parents.len() as u32).unwrap_or(0);
        if expected == 0 || cpt.len() != expected {
            return Err(BayesError::CptLength {
                node: name.to_string(),
                parents: parents.len(),
                expected,
                actual: cpt.len(),
            });
        }
        if let Some((index, &value)) = cpt
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(BayesError::ProbabilityOutOfRange {
                node: name.to_string(),
                index,
                value,
            });
        }
        Ok(Node {
            name: name.to_string(),
            parents,
            cpt,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn cpt(&self) -> &[f64] {
        &self.cpt
    }

    /// Row of the CPT selected by the parents' current values.
    pub fn cpt_index(&self, assignment: &Assignment) -> usize {
        let k = self.parents.len();
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| !assignment.get(**parent))
            .map(|(j, _)| 1usize << (k - 1 - j))
            .sum()
    }

    /// `P(self = true | parent values in the assignment)`.
    ///
    /// Every parent must already hold a value for the current trial.
    pub fn conditional_probability(&self, assignment: &Assignment) -> f64 {
        self.cpt[self.cpt_index(assignment)]
    }

    /// Probability of this node taking `value` given its parents.
    pub fn probability_of(&self, value: bool, assignment: &Assignment) -> f64 {
        let p = self.conditional_probability(assignment);
        if value { p } else { 1.0 - p }
    }
}
