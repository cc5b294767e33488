use crate::canvas::{CanvasData, CanvasNode, ModelInfo, ResolvedVariable};
use crate::ids::{IdGenerator, UuidIdGenerator};
use crate::plan::{GenericToolset, WorkflowPlan};
use ahash::AHashMap;
use tracing::{debug, info};

mod builder;
pub mod layout;
pub mod partition;
pub mod resolver;

use builder::GraphBuilder;
use layout::NodeLayout;
use partition::TaskPartition;
use resolver::EntityIdMap;

/// Per-call knobs for `WorkflowCompiler::compile`.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Hand node placement to the registered `NodeLayout` instead of stacking
    /// nodes at `x = 0`.
    pub auto_layout: bool,
    /// Copied into every task node's metadata.
    pub default_model: Option<ModelInfo>,
    /// Nodes already on the canvas, shown to the layout collaborator.
    pub start_nodes: Vec<CanvasNode>,
    /// Entity ids from an earlier compile, keyed by task id. Tasks found here
    /// keep their entity id; all others get a fresh one.
    pub reuse_entity_ids: AHashMap<String, String>,
}

/// Compiles workflow plans into canvas graphs.
///
/// A compiler holds no per-plan state, so one instance can serve any number of
/// compiles, from any number of threads.
pub struct WorkflowCompiler {
    layout: Option<Box<dyn NodeLayout>>,
    ids: Box<dyn IdGenerator>,
}

pub struct CompilerBuilder {
    layout: Option<Box<dyn NodeLayout>>,
    ids: Box<dyn IdGenerator>,
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            layout: None,
            ids: Box::new(UuidIdGenerator),
        }
    }

    pub fn with_layout(mut self, layout: Box<dyn NodeLayout>) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn build(self) -> WorkflowCompiler {
        WorkflowCompiler {
            layout: self.layout,
            ids: self.ids,
        }
    }
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for WorkflowCompiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

impl WorkflowCompiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    /// Compiles `plan` into nodes, edges and variables.
    ///
    /// Never fails: tasks with missing data still get a node, unknown toolsets
    /// are dropped, and dependencies on unknown tasks produce no edge. The
    /// result always has exactly one node per task.
    pub fn compile(
        &self,
        plan: &WorkflowPlan,
        available_toolsets: &[GenericToolset],
        options: &CompileOptions,
    ) -> CanvasData {
        let (canvas, _) = self.compile_with_entity_ids(plan, available_toolsets, options);
        canvas
    }

    /// Like `compile`, but also returns the task id to entity id map, ready to
    /// be passed back as `CompileOptions::reuse_entity_ids`.
    pub fn compile_with_entity_ids(
        &self,
        plan: &WorkflowPlan,
        available_toolsets: &[GenericToolset],
        options: &CompileOptions,
    ) -> (CanvasData, AHashMap<String, String>) {
        if plan.tasks.is_empty() {
            debug!(title = %plan.title, "plan has no tasks, nothing to compile");
            return (CanvasData::default(), AHashMap::new());
        }

        let ordered = TaskPartition::new(&plan.tasks).into_processing_order();

        // Pass 1: every task gets its entity id before any prompt is touched,
        // so mentions of tasks declared later still resolve.
        let entity_ids =
            EntityIdMap::assign(&ordered, self.ids.as_ref(), &options.reuse_entity_ids);

        // Pass 2: rewrite mentions against the complete table.
        let queries: Vec<String> = ordered
            .iter()
            .map(|task| entity_ids.resolve_mentions(&task.prompt))
            .collect();

        let builder = GraphBuilder::new(
            self.ids.as_ref(),
            self.layout.as_deref(),
            options,
            available_toolsets,
        );
        let nodes = builder.build_nodes(&ordered, &entity_ids, queries);
        let edges = builder.build_edges(&ordered, &nodes);
        let variables = plan.variables.iter().map(ResolvedVariable::from).collect();

        info!(
            title = %plan.title,
            nodes = nodes.len(),
            edges = edges.len(),
            "compiled workflow plan"
        );

        let canvas = CanvasData {
            nodes,
            edges,
            variables,
        };
        (canvas, entity_ids.into_task_map())
    }
}

/// Compiles with a default `WorkflowCompiler` (random ids, no layout collaborator).
pub fn compile_plan(
    plan: &WorkflowPlan,
    available_toolsets: &[GenericToolset],
    options: &CompileOptions,
) -> CanvasData {
    WorkflowCompiler::default().compile(plan, available_toolsets, options)
}
