use super::CompileOptions;
use super::layout::{AddNodeRequest, NodeLayout};
use super::resolver::EntityIdMap;
use crate::canvas::{
    ActionStatus, CanvasEdge, CanvasEdgeType, CanvasNode, CanvasNodeData, CanvasNodeFilter,
    CanvasNodeType, HandleType, ResponseNodeMeta, XYPosition,
};
use crate::ids::IdGenerator;
use crate::plan::{GenericToolset, WorkflowTask};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use tracing::{debug, warn};

/// Vertical distance between stacked nodes when no layout collaborator runs.
const NODE_SPACING_Y: f64 = 240.0;

/// Turns ordered, id-resolved tasks into canvas nodes and edges.
pub(super) struct GraphBuilder<'a> {
    ids: &'a dyn IdGenerator,
    layout: Option<&'a dyn NodeLayout>,
    options: &'a CompileOptions,
    toolsets: &'a [GenericToolset],
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(
        ids: &'a dyn IdGenerator,
        layout: Option<&'a dyn NodeLayout>,
        options: &'a CompileOptions,
        toolsets: &'a [GenericToolset],
    ) -> Self {
        let layout = if options.auto_layout {
            if layout.is_none() {
                warn!("auto layout requested without a layout collaborator; stacking nodes");
            }
            layout
        } else {
            None
        };
        Self {
            ids,
            layout,
            options,
            toolsets,
        }
    }

    /// Builds one node per task, in the given order. `queries` holds each
    /// task's mention-resolved prompt at the same position.
    pub(super) fn build_nodes(
        &self,
        ordered: &[&WorkflowTask],
        entity_ids: &EntityIdMap,
        queries: Vec<String>,
    ) -> Vec<CanvasNode> {
        let mut placed: Vec<CanvasNode> = self.options.start_nodes.clone();
        let mut nodes = Vec::with_capacity(ordered.len());

        for (index, (task, query)) in ordered.iter().zip(queries).enumerate() {
            let node = CanvasNode {
                id: format!("node-{}", self.ids.unique_id()),
                node_type: CanvasNodeType::SkillResponse,
                position: None,
                data: CanvasNodeData {
                    title: task.title.clone(),
                    entity_id: entity_ids.assigned(index).to_string(),
                    content_preview: String::new(),
                    metadata: ResponseNodeMeta {
                        query,
                        selected_toolsets: self.resolve_toolsets(task),
                        context_items: Vec::new(),
                        status: ActionStatus::Init,
                        model_info: self.options.default_model.clone(),
                    },
                },
            };

            let node = match self.layout {
                Some(layout) => layout.prepare_add_node(AddNodeRequest {
                    node,
                    nodes: &placed,
                    edges: &[],
                    connect_to: Self::connect_to(task, entity_ids),
                    auto_layout: true,
                }),
                None => CanvasNode {
                    position: Some(XYPosition {
                        x: 0.0,
                        y: index as f64 * NODE_SPACING_Y,
                    }),
                    ..node
                },
            };

            placed.push(node.clone());
            nodes.push(node);
        }
        nodes
    }

    /// One edge per `dependency -> task` pair. Self-references, duplicates and
    /// dependencies on unknown tasks produce nothing.
    pub(super) fn build_edges(
        &self,
        ordered: &[&WorkflowTask],
        nodes: &[CanvasNode],
    ) -> Vec<CanvasEdge> {
        let mut node_ids: AHashMap<&str, &str> = AHashMap::with_capacity(nodes.len());
        for (task, node) in ordered.iter().zip(nodes) {
            node_ids.entry(task.id.as_str()).or_insert(node.id.as_str());
        }

        let mut seen: AHashSet<(&str, &str)> = AHashSet::new();
        let mut edges = Vec::new();
        for (task, node) in ordered.iter().zip(nodes) {
            for dependency in task.dependencies() {
                if dependency == &task.id {
                    continue;
                }
                let Some(&source) = node_ids.get(dependency.as_str()) else {
                    debug!(task = %task.id, dependency = %dependency, "skipping edge from unknown task");
                    continue;
                };
                if source == node.id || !seen.insert((source, node.id.as_str())) {
                    continue;
                }
                edges.push(CanvasEdge {
                    id: format!("edge-{}", self.ids.unique_id()),
                    source: source.to_string(),
                    target: node.id.clone(),
                    edge_type: CanvasEdgeType::Default,
                });
            }
        }
        edges
    }

    /// Matches each referenced toolset by id, then by registry key. References
    /// to toolsets the environment does not provide are dropped.
    fn resolve_toolsets(&self, task: &WorkflowTask) -> Vec<GenericToolset> {
        task.toolsets
            .iter()
            .filter_map(|reference| {
                let found = self
                    .toolsets
                    .iter()
                    .find(|t| t.id == *reference)
                    .or_else(|| self.toolsets.iter().find(|t| t.key() == Some(reference.as_str())));
                if found.is_none() {
                    debug!(task = %task.id, toolset = %reference, "dropping unavailable toolset");
                }
                found
            })
            .unique_by(|t| t.id.clone())
            .cloned()
            .collect()
    }

    fn connect_to(task: &WorkflowTask, entity_ids: &EntityIdMap) -> Vec<CanvasNodeFilter> {
        task.dependencies()
            .iter()
            .filter(|dependency| **dependency != task.id)
            .filter_map(|dependency| entity_ids.get(dependency))
            .map(|entity_id| CanvasNodeFilter {
                node_type: CanvasNodeType::SkillResponse,
                entity_id: entity_id.to_string(),
                handle_type: HandleType::Source,
            })
            .collect()
    }
}
