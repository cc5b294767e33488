use crate::plan::GenericToolset;
use serde::{Deserialize, Serialize};

/// Node kinds the compiler knows about. Task nodes are always `SkillResponse`;
/// `Start` nodes only arrive from the caller as layout context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanvasNodeType {
    SkillResponse,
    Start,
}

impl CanvasNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasNodeType::SkillResponse => "skillResponse",
            CanvasNodeType::Start => "start",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XYPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Init,
    Waiting,
    Executing,
    Finish,
    Failed,
}

/// The model a task node will run with unless the user picks another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    pub label: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseNodeMeta {
    /// The task prompt with every resolvable mention rewritten to entity ids.
    pub query: String,
    pub selected_toolsets: Vec<GenericToolset>,
    pub context_items: Vec<serde_json::Value>,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_info: Option<ModelInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNodeData {
    pub title: String,
    pub entity_id: String,
    pub content_preview: String,
    pub metadata: ResponseNodeMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: CanvasNodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<XYPosition>,
    pub data: CanvasNodeData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasEdgeType {
    #[default]
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub edge_type: CanvasEdgeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleType {
    Source,
    Target,
}

/// Identifies an existing node a new node should be wired to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasNodeFilter {
    #[serde(rename = "type")]
    pub node_type: CanvasNodeType,
    pub entity_id: String,
    pub handle_type: HandleType,
}
