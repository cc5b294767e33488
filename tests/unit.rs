//! Unit tests for error messages and the JSON shapes shared with the canvas.
mod common;
use common::*;
use plan_canvas::canvas::{ActionStatus, CanvasNodeData, ResponseNodeMeta};
use plan_canvas::error::{PatchTarget, ValidationIssue};
use plan_canvas::prelude::*;
use serde_json::json;

#[test]
fn test_error_display() {
    let err = ValidationError {
        issues: vec![
            ValidationIssue::new("tasks.0.id", "must not be empty"),
            ValidationIssue::new("", "invalid JSON"),
        ],
    };
    assert_eq!(
        err.to_string(),
        "Validation failed: tasks.0.id: must not be empty; invalid JSON"
    );

    let patch_err = PatchError::AlreadyExists {
        index: 2,
        op: "createVariable",
        target: PatchTarget::Variable,
        id: "topic".to_string(),
    };
    assert_eq!(
        patch_err.to_string(),
        "Operation #2 (createVariable) failed: variable 'topic' already exists"
    );

    let invalid = PatchError::InvalidPayload {
        index: 0,
        op: "createTask",
        target: PatchTarget::Task,
        id: String::new(),
        source: ValidationError::single("id", "must not be empty"),
    };
    assert!(invalid.to_string().ends_with("Validation failed: id: must not be empty"));
    assert!(std::error::Error::source(&invalid).is_some());
}

#[test]
fn test_operation_names_match_wire_tags() {
    let operations = vec![
        PatchOperation::UpdateTitle { title: None },
        PatchOperation::CreateTask {
            task: task("a", "", &[], &[]),
        },
        PatchOperation::UpdateTask {
            task_id: "a".to_string(),
            data: TaskUpdate::default(),
        },
        PatchOperation::DeleteTask {
            task_id: "a".to_string(),
        },
        PatchOperation::CreateVariable {
            variable: text_variable("v", "V"),
        },
        PatchOperation::UpdateVariable {
            variable_id: "v".to_string(),
            data: VariableUpdate::default(),
        },
        PatchOperation::DeleteVariable {
            variable_id: "v".to_string(),
        },
    ];

    for (operation, expected) in operations.iter().zip(PatchOperation::NAMES) {
        assert_eq!(operation.name(), expected);
        let wire = serde_json::to_value(operation).unwrap();
        assert_eq!(wire["op"], expected);
    }
}

#[test]
fn test_patch_operation_wire_shape() {
    let op = PatchOperation::UpdateVariable {
        variable_id: "files".to_string(),
        data: VariableUpdate {
            required: Some(true),
            ..Default::default()
        },
    };
    assert_eq!(
        serde_json::to_value(&op).unwrap(),
        json!({ "op": "updateVariable", "variableId": "files", "data": { "required": true } })
    );
}

#[test]
fn test_canvas_node_wire_shape() {
    let node = CanvasNode {
        id: "node-1".to_string(),
        node_type: CanvasNodeType::SkillResponse,
        position: Some(XYPosition { x: 0.0, y: 240.0 }),
        data: CanvasNodeData {
            title: "Collect".to_string(),
            entity_id: "ar-1".to_string(),
            content_preview: String::new(),
            metadata: ResponseNodeMeta {
                query: "Find sources".to_string(),
                selected_toolsets: vec![toolset("web", Some("web_search"))],
                context_items: vec![],
                status: ActionStatus::Init,
                model_info: None,
            },
        },
    };

    let wire = serde_json::to_value(&node).unwrap();
    assert_eq!(wire["type"], "skillResponse");
    assert_eq!(wire["position"], json!({ "x": 0.0, "y": 240.0 }));
    assert_eq!(wire["data"]["entityId"], "ar-1");
    assert_eq!(wire["data"]["contentPreview"], "");
    assert_eq!(wire["data"]["metadata"]["status"], "init");
    assert_eq!(
        wire["data"]["metadata"]["selectedToolsets"][0]["toolset"]["key"],
        "web_search"
    );
    assert!(wire["data"]["metadata"].get("modelInfo").is_none());
}

#[test]
fn test_variable_value_is_tagged_by_type() {
    let values = vec![
        VariableValue::Text {
            text: "hello".to_string(),
        },
        VariableValue::Resource {
            resource: plan_canvas::plan::ResourceValue {
                name: "report.pdf".to_string(),
                file_type: ResourceType::Document,
            },
        },
    ];
    assert_eq!(
        serde_json::to_value(&values).unwrap(),
        json!([
            { "type": "text", "text": "hello" },
            { "type": "resource", "resource": { "name": "report.pdf", "fileType": "document" } }
        ])
    );
}

#[test]
fn test_resolved_variable_copies_fields_unchanged() {
    let resource = WorkflowVariable {
        variable_id: "files".to_string(),
        variable_type: VariableType::Resource,
        name: "Files".to_string(),
        description: String::new(),
        required: true,
        resource_types: None,
        value: vec![],
    };
    let resolved = ResolvedVariable::from(&resource);
    assert_eq!(resolved.variable_type, VariableType::Resource);
    assert_eq!(resolved.resource_types, None);
    assert!(resolved.required);

    let text = ResolvedVariable::from(&text_variable("topic", "Topic"));
    assert_eq!(text.name, "Topic");
    assert_eq!(text.value.len(), 1);
}

#[test]
fn test_task_dependency_helpers() {
    let root = task("a", "", &[], &[]);
    assert!(root.is_root());
    assert!(root.dependencies().is_empty());

    let empty_list = WorkflowTask {
        dependent_tasks: Some(vec![]),
        ..task("b", "", &[], &[])
    };
    assert!(empty_list.is_root());

    let dependent = task("c", "", &["a"], &[]);
    assert!(!dependent.is_root());
}
