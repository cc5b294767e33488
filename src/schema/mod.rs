//! Validation of untrusted plans and patch operations.
//!
//! Plans usually come straight from a language model, so the plan parser is
//! lenient: missing or `null` task fields become empty strings, and only
//! structural problems (wrong types, unknown enum values, duplicate ids) are
//! reported. Every problem is collected with a dotted path before failing, so
//! a single `ValidationError` describes the whole input.

mod checks;

pub(crate) use checks::{check_task, check_variable, check_variable_payload};

use crate::error::{ValidationError, ValidationIssue};
use crate::patch::PatchOperation;
use crate::plan::{WorkflowPlan, WorkflowTask, WorkflowVariable};
use ahash::AHashMap;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Accumulates issues across a validation pass.
#[derive(Debug, Default)]
pub(crate) struct Issues(Vec<ValidationIssue>);

impl Issues {
    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationIssue::new(path, message));
    }

    pub(crate) fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}

pub(crate) fn join_path(base: &str, segment: impl Display) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", base, segment)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_element<T: DeserializeOwned>(value: &Value, path: &str, issues: &mut Issues) -> Option<T> {
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            issues.push(path, e.to_string());
            None
        }
    }
}

fn scalar_text(object: &Map<String, Value>, key: &str, issues: &mut Issues) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
        Some(other) => {
            issues.push(key, format!("expected a string, found {}", describe(other)));
            String::new()
        }
    }
}

fn list_at<'v>(object: &'v Map<String, Value>, key: &str, issues: &mut Issues) -> &'v [Value] {
    match object.get(key) {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(other) => {
            issues.push(key, format!("expected an array, found {}", describe(other)));
            &[]
        }
    }
}

/// Reports every id that was already used by an earlier element.
fn check_unique<'a>(
    ids: impl Iterator<Item = (usize, &'a str)>,
    collection: &str,
    field: &str,
    issues: &mut Issues,
) {
    let mut first_seen: AHashMap<&str, usize> = AHashMap::new();
    for (index, id) in ids {
        if id.is_empty() {
            continue;
        }
        if let Some(first) = first_seen.get(id) {
            issues.push(
                format!("{}.{}.{}", collection, index, field),
                format!("duplicate id '{}' (first used at {}.{})", id, collection, first),
            );
        } else {
            first_seen.insert(id, index);
        }
    }
}

/// Validates a freshly generated plan and returns it with defaults applied.
pub fn parse_workflow_plan(value: &Value) -> Result<WorkflowPlan, ValidationError> {
    let Some(object) = value.as_object() else {
        return Err(ValidationError::single(
            "",
            format!("expected a plan object, found {}", describe(value)),
        ));
    };

    let mut issues = Issues::default();
    let title = scalar_text(object, "title", &mut issues);

    let mut tasks = Vec::new();
    let mut task_slots = Vec::new();
    for (index, raw) in list_at(object, "tasks", &mut issues).iter().enumerate() {
        let path = format!("tasks.{}", index);
        if let Some(task) = parse_element::<WorkflowTask>(raw, &path, &mut issues) {
            task_slots.push(index);
            tasks.push(task);
        }
    }
    check_unique(
        task_slots.iter().zip(&tasks).map(|(i, t)| (*i, t.id.as_str())),
        "tasks",
        "id",
        &mut issues,
    );

    let mut variables = Vec::new();
    let mut variable_slots = Vec::new();
    for (index, raw) in list_at(object, "variables", &mut issues).iter().enumerate() {
        let path = format!("variables.{}", index);
        if let Some(variable) = parse_element::<WorkflowVariable>(raw, &path, &mut issues) {
            check_variable(&variable, &path, &mut issues);
            variable_slots.push(index);
            variables.push(variable);
        }
    }
    check_unique(
        variable_slots
            .iter()
            .zip(&variables)
            .map(|(i, v)| (*i, v.variable_id.as_str())),
        "variables",
        "variableId",
        &mut issues,
    );

    issues.into_result(WorkflowPlan {
        title,
        tasks,
        variables,
    })
}

/// Parses raw JSON text into a validated plan.
pub fn parse_workflow_plan_str(json: &str) -> Result<WorkflowPlan, ValidationError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ValidationError::single("", format!("invalid JSON: {}", e)))?;
    parse_workflow_plan(&value)
}

/// Validates a list of patch operations, given either as a bare array or as
/// an object with an `operations` array.
pub fn parse_patch_operations(value: &Value) -> Result<Vec<PatchOperation>, ValidationError> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(object) if object.contains_key("operations") => {
            let mut issues = Issues::default();
            let items = list_at(object, "operations", &mut issues);
            issues.into_result(items)?
        }
        other => {
            return Err(ValidationError::single(
                "",
                format!("expected an array of patch operations, found {}", describe(other)),
            ));
        }
    };

    let mut issues = Issues::default();
    let mut operations = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        let path = format!("operations.{}", index);
        let Some(op) = raw.get("op").and_then(Value::as_str) else {
            issues.push(join_path(&path, "op"), "missing operation type");
            continue;
        };
        let Some(required) = PatchOperation::required_fields(op) else {
            issues.push(
                join_path(&path, "op"),
                format!(
                    "unknown operation '{}', expected one of {}",
                    op,
                    PatchOperation::NAMES.iter().join(", ")
                ),
            );
            continue;
        };

        let missing = required
            .iter()
            .filter(|field| raw.get(**field).is_none_or(Value::is_null))
            .collect_vec();
        if !missing.is_empty() {
            for field in missing {
                issues.push(join_path(&path, field), format!("required by {}", op));
            }
            continue;
        }

        let Some(operation) = parse_element::<PatchOperation>(raw, &path, &mut issues) else {
            continue;
        };
        match &operation {
            PatchOperation::CreateTask { task } => {
                check_task(task, &join_path(&path, "task"), &mut issues)
            }
            PatchOperation::CreateVariable { variable } => {
                check_variable_payload(variable, &join_path(&path, "variable"), &mut issues)
            }
            _ => {}
        }
        operations.push(operation);
    }

    issues.into_result(operations)
}

/// Validates a task payload submitted as an explicit edit.
pub fn validate_task(task: &WorkflowTask) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    check_task(task, "", &mut issues);
    issues.into_result(())
}

/// Validates a complete variable, e.g. after merging a partial update into it.
/// Stricter than plan parsing: the variable must also be named.
pub fn validate_variable(variable: &WorkflowVariable) -> Result<(), ValidationError> {
    let mut issues = Issues::default();
    check_variable_payload(variable, "", &mut issues);
    issues.into_result(())
}
