//! The graph description handed to the canvas renderer.

mod node;
mod variable;

pub use node::*;
pub use variable::*;

use serde::{Deserialize, Serialize};

/// The complete output of one compile: nodes, the edges between them, and the
/// plan's variables in canvas form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasData {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
    pub variables: Vec<ResolvedVariable>,
}

impl CanvasData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.variables.is_empty()
    }

    pub fn node(&self, node_id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Looks up a task node by the entity id the compiler assigned to it.
    pub fn node_by_entity_id(&self, entity_id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.data.entity_id == entity_id)
    }
}
