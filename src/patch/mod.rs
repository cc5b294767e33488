//! Ordered, all-or-nothing edits to a `WorkflowPlan`.

mod operation;

pub use operation::*;

use crate::error::{PatchError, PatchTarget};
use crate::plan::WorkflowPlan;
use crate::schema;
use tracing::{debug, info};

/// Applies `operations` to a copy of `plan`, in order.
///
/// Either every operation succeeds and the edited copy is returned, or the
/// first failing operation is reported and the copy is dropped. `plan` itself
/// is never modified.
pub fn apply_patch(
    plan: &WorkflowPlan,
    operations: &[PatchOperation],
) -> Result<WorkflowPlan, PatchError> {
    let mut working = plan.clone();
    for (index, operation) in operations.iter().enumerate() {
        debug!(index, op = operation.name(), "applying patch operation");
        apply_operation(&mut working, index, operation)?;
    }
    info!(
        operations = operations.len(),
        tasks = working.tasks.len(),
        variables = working.variables.len(),
        "patch applied"
    );
    Ok(working)
}

fn apply_operation(
    plan: &mut WorkflowPlan,
    index: usize,
    operation: &PatchOperation,
) -> Result<(), PatchError> {
    let op = operation.name();
    match operation {
        PatchOperation::UpdateTitle { title } => {
            if let Some(title) = title {
                plan.title = title.clone();
            }
        }

        PatchOperation::CreateTask { task } => {
            schema::validate_task(task).map_err(|source| PatchError::InvalidPayload {
                index,
                op,
                target: PatchTarget::Task,
                id: task.id.clone(),
                source,
            })?;
            if plan.task(&task.id).is_some() {
                return Err(PatchError::AlreadyExists {
                    index,
                    op,
                    target: PatchTarget::Task,
                    id: task.id.clone(),
                });
            }
            plan.tasks.push(task.clone());
        }

        PatchOperation::UpdateTask { task_id, data } => {
            let position = find(
                plan.task_position(task_id),
                index,
                op,
                PatchTarget::Task,
                task_id,
            )?;
            let mut merged = plan.tasks[position].clone();
            data.merge_into(&mut merged);
            schema::validate_task(&merged).map_err(|source| PatchError::InvalidPayload {
                index,
                op,
                target: PatchTarget::Task,
                id: task_id.clone(),
                source,
            })?;
            plan.tasks[position] = merged;
        }

        PatchOperation::DeleteTask { task_id } => {
            let position = find(
                plan.task_position(task_id),
                index,
                op,
                PatchTarget::Task,
                task_id,
            )?;
            plan.tasks.remove(position);
            // No remaining task may keep waiting on the deleted one.
            for task in &mut plan.tasks {
                if let Some(dependencies) = task.dependent_tasks.as_mut() {
                    dependencies.retain(|dep| dep != task_id);
                }
            }
        }

        PatchOperation::CreateVariable { variable } => {
            schema::validate_variable(variable).map_err(|source| PatchError::InvalidPayload {
                index,
                op,
                target: PatchTarget::Variable,
                id: variable.variable_id.clone(),
                source,
            })?;
            if plan.variable(&variable.variable_id).is_some() {
                return Err(PatchError::AlreadyExists {
                    index,
                    op,
                    target: PatchTarget::Variable,
                    id: variable.variable_id.clone(),
                });
            }
            plan.variables.push(variable.clone());
        }

        PatchOperation::UpdateVariable { variable_id, data } => {
            let position = find(
                plan.variable_position(variable_id),
                index,
                op,
                PatchTarget::Variable,
                variable_id,
            )?;
            // The merged variable must pass validation as a whole.
            let merged = data.merged(&plan.variables[position]);
            schema::validate_variable(&merged).map_err(|source| PatchError::InvalidPayload {
                index,
                op,
                target: PatchTarget::Variable,
                id: variable_id.clone(),
                source,
            })?;
            plan.variables[position] = merged;
        }

        PatchOperation::DeleteVariable { variable_id } => {
            let position = find(
                plan.variable_position(variable_id),
                index,
                op,
                PatchTarget::Variable,
                variable_id,
            )?;
            plan.variables.remove(position);
        }
    }
    Ok(())
}

fn find(
    position: Option<usize>,
    index: usize,
    op: &'static str,
    target: PatchTarget,
    id: &str,
) -> Result<usize, PatchError> {
    position.ok_or_else(|| PatchError::NotFound {
        index,
        op,
        target,
        id: id.to_string(),
    })
}
