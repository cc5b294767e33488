use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolsetType {
    #[default]
    Regular,
    Mcp,
}

/// The registry entry a toolset instance was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsetDefinition {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A bundle of tools available in the caller's environment. Owned by the tool
/// registry; the compiler only reads and copies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericToolset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub toolset_type: ToolsetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolset: Option<ToolsetDefinition>,
    #[serde(default)]
    pub selected_tools: Vec<String>,
}

impl GenericToolset {
    /// The registry key of the underlying definition, if any.
    pub fn key(&self) -> Option<&str> {
        self.toolset.as_ref().map(|t| t.key.as_str())
    }
}
