use crate::canvas::{CanvasEdge, CanvasNode, CanvasNodeFilter};

/// Everything a layout collaborator gets to see when a task node is added.
#[derive(Debug)]
pub struct AddNodeRequest<'a> {
    /// The node as the compiler built it, without a position.
    pub node: CanvasNode,
    /// Caller-supplied start nodes followed by the nodes placed so far.
    pub nodes: &'a [CanvasNode],
    pub edges: &'a [CanvasEdge],
    /// Existing nodes the new one should connect from.
    pub connect_to: Vec<CanvasNodeFilter>,
    pub auto_layout: bool,
}

/// Positions new nodes on the canvas.
///
/// Only consulted when `CompileOptions::auto_layout` is set. The returned
/// node's `id` and `position` are taken as-is; its `data` should be passed
/// through unchanged.
pub trait NodeLayout: Send + Sync {
    fn prepare_add_node(&self, request: AddNodeRequest<'_>) -> CanvasNode;
}
