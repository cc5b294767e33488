use super::definition::WorkflowPlan;
use crate::error::PlanConversionError;
use crate::schema;

/// A trait for data that can be turned into a validated `WorkflowPlan`.
///
/// This is the entry point for untrusted input. The provided implementations
/// accept raw JSON text and already-parsed `serde_json::Value`s and run them
/// through the schema validator, so every plan that reaches the compiler has
/// lenient defaults applied and unique task and variable ids.
///
/// Implement it on your own structs to plug a different plan format into the
/// compiler.
///
/// # Example
///
/// ```rust,no_run
/// use plan_canvas::error::PlanConversionError;
/// use plan_canvas::plan::{IntoPlan, WorkflowPlan, WorkflowTask};
///
/// struct Checklist {
///     name: String,
///     steps: Vec<String>,
/// }
///
/// impl IntoPlan for Checklist {
///     fn into_plan(self) -> Result<WorkflowPlan, PlanConversionError> {
///         let tasks = self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, step)| WorkflowTask {
///                 id: format!("step-{}", i),
///                 title: step.clone(),
///                 prompt: step,
///                 // Each step waits for the previous one.
///                 dependent_tasks: (i > 0).then(|| vec![format!("step-{}", i - 1)]),
///                 toolsets: vec![],
///             })
///             .collect();
///         Ok(WorkflowPlan {
///             title: self.name,
///             tasks,
///             variables: vec![],
///         })
///     }
/// }
/// ```
pub trait IntoPlan {
    /// Consumes the object and converts it into a plan ready for compilation.
    fn into_plan(self) -> Result<WorkflowPlan, PlanConversionError>;
}

impl IntoPlan for WorkflowPlan {
    fn into_plan(self) -> Result<WorkflowPlan, PlanConversionError> {
        Ok(self)
    }
}

impl IntoPlan for serde_json::Value {
    fn into_plan(self) -> Result<WorkflowPlan, PlanConversionError> {
        Ok(schema::parse_workflow_plan(&self)?)
    }
}

impl IntoPlan for &str {
    fn into_plan(self) -> Result<WorkflowPlan, PlanConversionError> {
        let value: serde_json::Value = serde_json::from_str(self)
            .map_err(|e| PlanConversionError::JsonParseError(e.to_string()))?;
        value.into_plan()
    }
}
