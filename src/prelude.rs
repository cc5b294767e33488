//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions of the
//! crate, so that callers do not have to import each one individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use plan_canvas::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let plan_json = std::fs::read_to_string("path/to/plan.json")?;
//! let plan = plan_json.as_str().into_plan()?;
//!
//! let canvas = compile_plan(&plan, &[], &CompileOptions::default());
//! println!("{}", serde_json::to_string_pretty(&canvas)?);
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::layout::{AddNodeRequest, NodeLayout};
pub use crate::compiler::{CompileOptions, CompilerBuilder, WorkflowCompiler, compile_plan};
pub use crate::ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};

// Patching
pub use crate::patch::{PatchOperation, TaskUpdate, VariableUpdate, apply_patch};

// Validation
pub use crate::schema::{parse_patch_operations, parse_workflow_plan, parse_workflow_plan_str};

// Data structures
pub use crate::canvas::{
    CanvasData, CanvasEdge, CanvasNode, CanvasNodeFilter, CanvasNodeType, ModelInfo,
    ResolvedVariable, XYPosition,
};
pub use crate::plan::{
    GenericToolset, IntoPlan, ResourceType, ToolsetDefinition, ToolsetType, VariableType,
    VariableValue, WorkflowPlan, WorkflowTask, WorkflowVariable,
};

// Error types
pub use crate::error::{PatchError, PlanConversionError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
