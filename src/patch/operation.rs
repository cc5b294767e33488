use crate::plan::{ResourceType, VariableType, VariableValue, WorkflowTask, WorkflowVariable};
use serde::{Deserialize, Deserializer, Serialize};

/// Fields of a task that `updateTask` may overwrite. `None` leaves the current
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_tasks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolsets: Option<Vec<String>>,
}

impl TaskUpdate {
    pub(crate) fn merge_into(&self, task: &mut WorkflowTask) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(prompt) = &self.prompt {
            task.prompt = prompt.clone();
        }
        if let Some(dependent_tasks) = &self.dependent_tasks {
            task.dependent_tasks = Some(dependent_tasks.clone());
        }
        if let Some(toolsets) = &self.toolsets {
            task.toolsets = toolsets.clone();
        }
    }
}

/// Fields of a variable that `updateVariable` may overwrite. The variable id
/// itself is immutable and therefore absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_type: Option<VariableType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// `None` keeps the current list, `Some(None)` (an explicit JSON `null`)
    /// clears it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub resource_types: Option<Option<Vec<ResourceType>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<VariableValue>>,
}

impl VariableUpdate {
    /// Returns the variable as it would look after the update, leaving the
    /// original untouched so it can be validated before being committed.
    pub(crate) fn merged(&self, variable: &WorkflowVariable) -> WorkflowVariable {
        let mut merged = variable.clone();
        if let Some(variable_type) = self.variable_type {
            merged.variable_type = variable_type;
        }
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(required) = self.required {
            merged.required = required;
        }
        if let Some(resource_types) = &self.resource_types {
            merged.resource_types = resource_types.clone();
        }
        if let Some(value) = &self.value {
            merged.value = value.clone();
        }
        merged
    }
}

/// Only called when the field is present, so `null` becomes `Some(None)`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// One semantic edit to a plan.
///
/// On the wire the variant is selected by the `op` field, e.g.
/// `{"op": "deleteTask", "taskId": "research"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PatchOperation {
    UpdateTitle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    CreateTask {
        task: WorkflowTask,
    },
    UpdateTask {
        task_id: String,
        data: TaskUpdate,
    },
    DeleteTask {
        task_id: String,
    },
    CreateVariable {
        variable: WorkflowVariable,
    },
    UpdateVariable {
        variable_id: String,
        data: VariableUpdate,
    },
    DeleteVariable {
        variable_id: String,
    },
}

impl PatchOperation {
    pub const NAMES: [&'static str; 7] = [
        "updateTitle",
        "createTask",
        "updateTask",
        "deleteTask",
        "createVariable",
        "updateVariable",
        "deleteVariable",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatchOperation::UpdateTitle { .. } => "updateTitle",
            PatchOperation::CreateTask { .. } => "createTask",
            PatchOperation::UpdateTask { .. } => "updateTask",
            PatchOperation::DeleteTask { .. } => "deleteTask",
            PatchOperation::CreateVariable { .. } => "createVariable",
            PatchOperation::UpdateVariable { .. } => "updateVariable",
            PatchOperation::DeleteVariable { .. } => "deleteVariable",
        }
    }

    /// Payload fields that must be present for the given `op`, or `None` if
    /// the op is unknown.
    pub(crate) fn required_fields(op: &str) -> Option<&'static [&'static str]> {
        let fields: &'static [&'static str] = match op {
            "updateTitle" => &[],
            "createTask" => &["task"],
            "updateTask" => &["taskId", "data"],
            "deleteTask" => &["taskId"],
            "createVariable" => &["variable"],
            "updateVariable" => &["variableId", "data"],
            "deleteVariable" => &["variableId"],
            _ => return None,
        };
        Some(fields)
    }
}
