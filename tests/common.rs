//! Common test utilities for building plans, toolsets and compilers.
use plan_canvas::prelude::*;

/// Builds a task with the given dependencies and toolset references.
#[allow(dead_code)]
pub fn task(id: &str, prompt: &str, deps: &[&str], toolsets: &[&str]) -> WorkflowTask {
    WorkflowTask {
        id: id.to_string(),
        title: format!("Task {}", id),
        prompt: prompt.to_string(),
        dependent_tasks: if deps.is_empty() {
            None
        } else {
            Some(deps.iter().map(|d| d.to_string()).collect())
        },
        toolsets: toolsets.iter().map(|t| t.to_string()).collect(),
    }
}

#[allow(dead_code)]
pub fn plan(tasks: Vec<WorkflowTask>) -> WorkflowPlan {
    WorkflowPlan {
        title: "Test plan".to_string(),
        tasks,
        variables: vec![],
    }
}

#[allow(dead_code)]
pub fn toolset(id: &str, key: Option<&str>) -> GenericToolset {
    GenericToolset {
        id: id.to_string(),
        name: format!("Toolset {}", id),
        toolset_type: ToolsetType::Regular,
        toolset: key.map(|k| ToolsetDefinition {
            key: k.to_string(),
            name: None,
        }),
        selected_tools: vec![],
    }
}

#[allow(dead_code)]
pub fn text_variable(id: &str, name: &str) -> WorkflowVariable {
    WorkflowVariable {
        variable_id: id.to_string(),
        variable_type: VariableType::String,
        name: name.to_string(),
        description: String::new(),
        required: false,
        resource_types: None,
        value: vec![VariableValue::Text {
            text: "hello".to_string(),
        }],
    }
}

/// A three-step research plan: `collect` -> `analyze` -> `report`, where
/// `report` also depends on `collect` directly.
///
/// Tasks are declared out of order on purpose, and `collect` mentions
/// `report`, which is declared after it.
#[allow(dead_code)]
pub fn research_plan() -> WorkflowPlan {
    WorkflowPlan {
        title: "Research".to_string(),
        tasks: vec![
            task(
                "report",
                "Write up @{type=agent,id=analyze,name=Analysis}",
                &["analyze", "collect"],
                &["docs"],
            ),
            task(
                "collect",
                "Gather sources for @{type=agent,id=report,name=Report}",
                &[],
                &["web", "ghost"],
            ),
            task("analyze", "Analyze the sources", &["collect"], &[]),
        ],
        variables: vec![text_variable("topic", "Topic")],
    }
}

/// A compiler with reproducible ids: `ar-1`, `ar-2`, ... and `node-3`, ...
#[allow(dead_code)]
pub fn sequential_compiler() -> WorkflowCompiler {
    WorkflowCompiler::builder()
        .with_id_generator(Box::new(SequentialIdGenerator::new()))
        .build()
}
