use super::{Issues, join_path};
use crate::plan::{VariableType, VariableValue, WorkflowTask, WorkflowVariable};

/// Rules for a task that arrives as an explicit edit rather than as part of a
/// generated plan.
pub(crate) fn check_task(task: &WorkflowTask, path: &str, issues: &mut Issues) {
    if task.id.trim().is_empty() {
        issues.push(join_path(path, "id"), "must not be empty");
    }
    if !task.id.is_empty() && task.dependencies().iter().any(|dep| dep == &task.id) {
        issues.push(
            join_path(path, "dependentTasks"),
            format!("task '{}' cannot depend on itself", task.id),
        );
    }
}

/// `check_variable` plus the rules that only apply to explicit edits.
pub(crate) fn check_variable_payload(
    variable: &WorkflowVariable,
    path: &str,
    issues: &mut Issues,
) {
    check_variable(variable, path, issues);
    if variable.name.trim().is_empty() {
        issues.push(join_path(path, "name"), "must not be empty");
    }
}

pub(crate) fn check_variable(variable: &WorkflowVariable, path: &str, issues: &mut Issues) {
    if variable.variable_id.trim().is_empty() {
        issues.push(join_path(path, "variableId"), "must not be empty");
    }

    if variable.variable_type == VariableType::String && variable.resource_types.is_some() {
        issues.push(
            join_path(path, "resourceTypes"),
            "only allowed when variableType is \"resource\"",
        );
    }

    for (index, value) in variable.value.iter().enumerate() {
        let VariableValue::Resource { resource } = value else {
            continue;
        };
        let value_path = join_path(&join_path(path, "value"), index);
        match (&variable.variable_type, &variable.resource_types) {
            (VariableType::String, _) => issues.push(
                value_path,
                "resource values require variableType \"resource\"",
            ),
            (VariableType::Resource, Some(accepted)) if !accepted.contains(&resource.file_type) => {
                issues.push(
                    join_path(&value_path, "resource.fileType"),
                    format!(
                        "'{}' is not one of the accepted resourceTypes",
                        resource.file_type.as_str()
                    ),
                )
            }
            _ => {}
        }
    }
}
