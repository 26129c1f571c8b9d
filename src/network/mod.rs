pub mod assignment;
pub mod evidence;
pub mod graph;
pub mod node;
pub mod spec;

pub use assignment::Assignment;
pub use evidence::{Evidence, Query};
pub use graph::BayesNetwork;
pub use node::{Node, NodeId};
pub use spec::{NetworkSpec, NodeSpec};
