//! # plan-canvas - Workflow Plan Compiler and Patch Engine
//!
//! **plan-canvas** turns a declarative workflow plan (usually written by an AI
//! agent) into a canvas graph that a visual execution surface can render, and
//! applies ordered, semantic edits to such plans without breaking their
//! internal references.
//!
//! ## Core Workflow
//!
//! 1.  **Load the plan**: Parse untrusted JSON with [`schema::parse_workflow_plan`]
//!     (or anything implementing [`plan::IntoPlan`]). Missing task fields are
//!     tolerated; structural problems come back as one path-qualified
//!     [`error::ValidationError`].
//! 2.  **Compile**: Build a [`compiler::WorkflowCompiler`] and call `compile` with
//!     the toolsets available in the environment. Every task becomes exactly one
//!     node with a fresh entity id, every resolvable dependency becomes an edge,
//!     and `@{type=agent,id=...}` mentions in prompts are rewritten to entity ids,
//!     including mentions of tasks declared further down the list.
//! 3.  **Edit**: Apply a list of [`patch::PatchOperation`]s with
//!     [`patch::apply_patch`]. The edit is all-or-nothing: the first invalid
//!     operation aborts the patch and the caller's plan is left untouched.
//! 4.  **Recompile** the patched plan. Pass the entity ids of the previous compile
//!     through `CompileOptions::reuse_entity_ids` to keep them stable.
//!
//! Both the compiler and the patch engine are pure, synchronous functions of
//! their inputs. Nothing is persisted and nothing is executed.
//!
//! ## Quick Start
//!
//! ```rust
//! use plan_canvas::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let plan = parse_workflow_plan(&json!({
//!         "title": "Market brief",
//!         "tasks": [
//!             {
//!                 "id": "collect",
//!                 "title": "Collect sources",
//!                 "prompt": "Find recent articles",
//!                 "toolsets": ["web-search"]
//!             },
//!             {
//!                 "id": "write",
//!                 "title": "Write brief",
//!                 "prompt": "Summarize @{type=agent,id=collect,name=Collect sources}",
//!                 "dependentTasks": ["collect"],
//!                 "toolsets": []
//!             }
//!         ]
//!     }))?;
//!
//!     let toolsets = vec![GenericToolset {
//!         id: "web-search".to_string(),
//!         name: "Web Search".to_string(),
//!         toolset_type: ToolsetType::Regular,
//!         toolset: None,
//!         selected_tools: vec![],
//!     }];
//!
//!     let compiler = WorkflowCompiler::builder().build();
//!     let canvas = compiler.compile(&plan, &toolsets, &CompileOptions::default());
//!     assert_eq!(canvas.nodes.len(), 2);
//!     assert_eq!(canvas.edges.len(), 1);
//!
//!     // Drop the first task; the dependency on it disappears with it.
//!     let patched = apply_patch(
//!         &plan,
//!         &[PatchOperation::DeleteTask { task_id: "collect".to_string() }],
//!     )?;
//!     assert!(patched.tasks[0].dependencies().is_empty());
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod compiler;
pub mod error;
pub mod ids;
pub mod patch;
pub mod plan;
pub mod prelude;
pub mod schema;
