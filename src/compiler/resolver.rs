use crate::canvas::CanvasNodeType;
use crate::ids::IdGenerator;
use crate::plan::WorkflowTask;
use ahash::AHashMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `@{type=agent,id=<taskId>,name=<label>}`
static AGENT_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@\{type=agent,id=([^,}]*),name=([^}]*)\}").expect("mention pattern is valid")
});

/// The symbol table of one compile: plan-local task ids mapped to the
/// entity ids minted for them.
#[derive(Debug, Default, Clone)]
pub struct EntityIdMap {
    /// One entry per task, in processing order.
    assigned: Vec<String>,
    /// First task with a given id wins the lookup.
    by_task: AHashMap<String, String>,
}

impl EntityIdMap {
    /// Assigns an entity id to every task without looking at any prompt.
    ///
    /// Ids found in `reuse` are kept for their task; everything else gets a
    /// fresh id from `ids`.
    pub fn assign(
        tasks: &[&WorkflowTask],
        ids: &dyn IdGenerator,
        reuse: &AHashMap<String, String>,
    ) -> Self {
        let mut map = Self {
            assigned: Vec::with_capacity(tasks.len()),
            by_task: AHashMap::with_capacity(tasks.len()),
        };
        for task in tasks {
            let first_occurrence = !map.by_task.contains_key(&task.id);
            let entity_id = match reuse.get(&task.id) {
                Some(previous) if first_occurrence => previous.clone(),
                _ => ids.node_entity_id(CanvasNodeType::SkillResponse),
            };
            if first_occurrence {
                map.by_task.insert(task.id.clone(), entity_id.clone());
            }
            map.assigned.push(entity_id);
        }
        map
    }

    pub fn get(&self, task_id: &str) -> Option<&str> {
        self.by_task.get(task_id).map(String::as_str)
    }

    /// The entity id of the task at `position` in processing order.
    pub fn assigned(&self, position: usize) -> &str {
        &self.assigned[position]
    }

    /// Rewrites every agent mention whose task id is known. Mentions of unknown
    /// tasks are left exactly as written.
    pub fn resolve_mentions(&self, prompt: &str) -> String {
        AGENT_MENTION
            .replace_all(prompt, |caps: &Captures| match self.by_task.get(&caps[1]) {
                Some(entity_id) => format!("@{{type=agent,id={},name={}}}", entity_id, &caps[2]),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Task id to entity id, for feeding back into a later compile.
    pub fn into_task_map(self) -> AHashMap<String, String> {
        self.by_task
    }
}
