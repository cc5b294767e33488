use serde::{Deserialize, Deserializer, Serialize};

/// A single unit of work in a plan.
///
/// `id` is chosen by the plan author and is only unique within one plan. It is
/// never used as a canvas identifier; the compiler mints an entity id for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTask {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// May embed `@{type=agent,id=<taskId>,name=<label>}` mentions of other tasks.
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_tasks: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub toolsets: Vec<String>,
}

impl WorkflowTask {
    /// Ids of the tasks that must complete before this one.
    pub fn dependencies(&self) -> &[String] {
        self.dependent_tasks.as_deref().unwrap_or_default()
    }

    /// A root task has no dependencies at all.
    pub fn is_root(&self) -> bool {
        self.dependencies().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    String,
    Resource,
}

/// File categories a resource variable may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Document,
    Image,
    Audio,
    Video,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Document => "document",
            ResourceType::Image => "image",
            ResourceType::Audio => "audio",
            ResourceType::Video => "video",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceValue {
    pub name: String,
    pub file_type: ResourceType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VariableValue {
    Text { text: String },
    Resource { resource: ResourceValue },
}

/// A user-supplied input of the workflow. `variable_id` is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowVariable {
    pub variable_id: String,
    #[serde(default)]
    pub variable_type: VariableType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_types: Option<Vec<ResourceType>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub value: Vec<VariableValue>,
}

/// The declarative plan an agent produces: a titled, ordered list of tasks plus
/// the variables they consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPlan {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tasks: Vec<WorkflowTask>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub variables: Vec<WorkflowVariable>,
}

impl WorkflowPlan {
    pub fn task(&self, task_id: &str) -> Option<&WorkflowTask> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn variable(&self, variable_id: &str) -> Option<&WorkflowVariable> {
        self.variables.iter().find(|v| v.variable_id == variable_id)
    }

    pub fn variable_position(&self, variable_id: &str) -> Option<usize> {
        self.variables
            .iter()
            .position(|v| v.variable_id == variable_id)
    }
}

/// Agents routinely omit fields, send `null`, or emit numeric ids. All of these
/// collapse to a string instead of rejecting the whole plan.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        Some(Raw::Flag(flag)) => flag.to_string(),
        None => String::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
