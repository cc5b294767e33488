use crate::plan::{ResourceType, VariableType, VariableValue, WorkflowVariable};
use serde::{Deserialize, Serialize};

/// A plan variable as the canvas stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariable {
    pub variable_id: String,
    pub variable_type: VariableType,
    pub name: String,
    pub description: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_types: Option<Vec<ResourceType>>,
    pub value: Vec<VariableValue>,
}

impl From<&WorkflowVariable> for ResolvedVariable {
    fn from(variable: &WorkflowVariable) -> Self {
        Self {
            variable_id: variable.variable_id.clone(),
            variable_type: variable.variable_type,
            name: variable.name.clone(),
            description: variable.description.clone(),
            required: variable.required,
            resource_types: variable.resource_types.clone(),
            value: variable.value.clone(),
        }
    }
}
