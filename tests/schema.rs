//! Tests for plan and patch-operation validation.
use plan_canvas::prelude::*;
use serde_json::json;

fn paths(err: &ValidationError) -> Vec<&str> {
    err.issues.iter().map(|i| i.path.as_str()).collect()
}

#[test]
fn test_missing_task_fields_coerce_to_empty() {
    let plan = parse_workflow_plan(&json!({
        "title": "Partial",
        "tasks": [
            { "id": "a" },
            { "title": null, "prompt": 42, "id": 7, "toolsets": null }
        ]
    }))
    .expect("Partial tasks should be accepted");

    assert_eq!(plan.tasks.len(), 2);
    assert_eq!(plan.tasks[0].title, "");
    assert_eq!(plan.tasks[0].prompt, "");
    assert!(plan.tasks[0].toolsets.is_empty());
    assert_eq!(plan.tasks[1].id, "7");
    assert_eq!(plan.tasks[1].prompt, "42");
    assert!(plan.variables.is_empty());
}

#[test]
fn test_missing_collections_default_to_empty() {
    let plan = parse_workflow_plan(&json!({})).unwrap();
    assert_eq!(plan, WorkflowPlan::default());
}

#[test]
fn test_non_object_plan_is_rejected() {
    let err = parse_workflow_plan(&json!(["not", "a", "plan"])).unwrap_err();
    assert_eq!(err.issues.len(), 1);
    assert!(err.to_string().starts_with("Validation failed: expected a plan object"));
}

#[test]
fn test_invalid_resource_type_is_reported_with_path() {
    let err = parse_workflow_plan(&json!({
        "tasks": [],
        "variables": [
            {
                "variableId": "v1",
                "variableType": "resource",
                "name": "Files",
                "resourceTypes": ["document", "spreadsheet"]
            }
        ]
    }))
    .unwrap_err();

    assert_eq!(paths(&err), vec!["variables.0"]);
    assert!(err.issues[0].message.contains("spreadsheet"));
}

#[test]
fn test_resource_types_require_resource_variable() {
    let err = parse_workflow_plan(&json!({
        "variables": [
            {
                "variableId": "v1",
                "variableType": "string",
                "name": "Topic",
                "resourceTypes": ["image"],
                "value": [
                    { "type": "resource", "resource": { "name": "a.png", "fileType": "image" } }
                ]
            }
        ]
    }))
    .unwrap_err();

    assert_eq!(
        paths(&err),
        vec!["variables.0.resourceTypes", "variables.0.value.0"]
    );
}

#[test]
fn test_resource_value_must_match_accepted_types() {
    let err = parse_workflow_plan(&json!({
        "variables": [
            {
                "variableId": "v1",
                "variableType": "resource",
                "resourceTypes": ["image"],
                "value": [
                    { "type": "resource", "resource": { "name": "a.mp3", "fileType": "audio" } }
                ]
            }
        ]
    }))
    .unwrap_err();

    assert_eq!(paths(&err), vec!["variables.0.value.0.resource.fileType"]);
    assert!(err.issues[0].message.contains("'audio'"));
}

#[test]
fn test_duplicate_ids_are_reported() {
    let err = parse_workflow_plan(&json!({
        "tasks": [ { "id": "a" }, { "id": "b" }, { "id": "a" } ],
        "variables": [ { "variableId": "v" }, { "variableId": "v" } ]
    }))
    .unwrap_err();

    assert_eq!(paths(&err), vec!["tasks.2.id", "variables.1.variableId"]);
    assert!(err.issues[0].message.contains("tasks.0"));
}

#[test]
fn test_all_issues_are_joined_into_one_message() {
    let err = parse_workflow_plan(&json!({
        "title": ["not", "text"],
        "tasks": "nope"
    }))
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Validation failed: title: expected a string, found an array; tasks: expected an array, found a string"
    );
}

#[test]
fn test_plan_from_json_text() {
    let plan = parse_workflow_plan_str(r#"{"title":"T","tasks":[{"id":"a","dependentTasks":["b"]}]}"#)
        .unwrap();
    assert_eq!(plan.tasks[0].dependencies(), ["b"]);

    let err = parse_workflow_plan_str("{ not json").unwrap_err();
    assert!(err.issues[0].message.starts_with("invalid JSON"));
}

#[test]
fn test_into_plan_accepts_text_and_values() {
    let plan = r#"{"title":"T","tasks":[]}"#.into_plan().unwrap();
    assert_eq!(plan.title, "T");

    let err = "[]".into_plan().unwrap_err();
    assert!(matches!(err, PlanConversionError::Validation(_)));

    let err = "{".into_plan().unwrap_err();
    assert!(matches!(err, PlanConversionError::JsonParseError(_)));
}

#[test]
fn test_patch_operations_parse_from_json() {
    let operations = parse_patch_operations(&json!([
        { "op": "updateTitle", "title": "New" },
        { "op": "createTask", "task": { "id": "t", "title": "T", "prompt": "p", "toolsets": [] } },
        { "op": "updateTask", "taskId": "t", "data": { "dependentTasks": ["a"] } },
        { "op": "deleteTask", "taskId": "t" },
        { "op": "createVariable", "variable": { "variableId": "v", "variableType": "string", "name": "V" } },
        { "op": "updateVariable", "variableId": "v", "data": { "required": true } },
        { "op": "deleteVariable", "variableId": "v" }
    ]))
    .unwrap();

    assert_eq!(operations.len(), 7);
    let names: Vec<&str> = operations.iter().map(|o| o.name()).collect();
    assert_eq!(names, PatchOperation::NAMES.to_vec());
    assert_eq!(
        operations[2],
        PatchOperation::UpdateTask {
            task_id: "t".to_string(),
            data: TaskUpdate {
                dependent_tasks: Some(vec!["a".to_string()]),
                ..Default::default()
            },
        }
    );
}

#[test]
fn test_patch_operations_accept_wrapped_list() {
    let operations = parse_patch_operations(&json!({
        "operations": [ { "op": "deleteTask", "taskId": "x" } ]
    }))
    .unwrap();
    assert_eq!(operations.len(), 1);
}

#[test]
fn test_patch_operations_report_missing_payloads_and_unknown_ops() {
    let err = parse_patch_operations(&json!([
        { "op": "createTask" },
        { "op": "renameEverything" },
        { "taskId": "x" },
        { "op": "updateVariable", "variableId": "v" },
        { "op": "createVariable", "variable": { "variableId": "v", "name": "V", "resourceTypes": ["image"] } },
        { "op": "createTask", "task": { "title": "no id" } }
    ]))
    .unwrap_err();

    assert_eq!(
        paths(&err),
        vec![
            "operations.0.task",
            "operations.1.op",
            "operations.2.op",
            "operations.3.data",
            "operations.4.variable.resourceTypes",
            "operations.5.task.id",
        ]
    );
    assert!(err.issues[1].message.contains("unknown operation 'renameEverything'"));
}

#[test]
fn test_patch_operations_must_be_a_list() {
    let err = parse_patch_operations(&json!("deleteTask")).unwrap_err();
    assert!(err.to_string().contains("expected an array of patch operations"));
}

#[test]
fn test_unnamed_variables_are_plan_lenient_but_edit_strict() {
    let plan = parse_workflow_plan(&json!({ "variables": [ { "variableId": "v" } ] })).unwrap();
    assert_eq!(plan.variables[0].name, "");

    let err = parse_patch_operations(&json!([
        { "op": "createVariable", "variable": { "variableId": "v" } }
    ]))
    .unwrap_err();
    assert_eq!(paths(&err), vec!["operations.0.variable.name"]);
}

#[test]
fn test_update_variable_distinguishes_null_from_absent() {
    let operations = parse_patch_operations(&json!([
        { "op": "updateVariable", "variableId": "v", "data": { "resourceTypes": null } },
        { "op": "updateVariable", "variableId": "v", "data": {} }
    ]))
    .unwrap();

    let cleared = match &operations[0] {
        PatchOperation::UpdateVariable { data, .. } => data.resource_types.clone(),
        other => panic!("Expected updateVariable, got {:?}", other),
    };
    let absent = match &operations[1] {
        PatchOperation::UpdateVariable { data, .. } => data.resource_types.clone(),
        other => panic!("Expected updateVariable, got {:?}", other),
    };
    assert_eq!(cleared, Some(None));
    assert_eq!(absent, None);
}
