use crate::plan::WorkflowTask;

/// Tasks split into roots (no dependencies) and dependents, each group in
/// declaration order.
///
/// This is a single-level split, not a topological sort. A dependent that
/// depends on another dependent keeps its declaration position.
#[derive(Debug, Clone)]
pub struct TaskPartition<'a> {
    pub roots: Vec<&'a WorkflowTask>,
    pub dependents: Vec<&'a WorkflowTask>,
}

impl<'a> TaskPartition<'a> {
    pub fn new(tasks: &'a [WorkflowTask]) -> Self {
        let (roots, dependents) = tasks.iter().partition(|task| task.is_root());
        Self { roots, dependents }
    }

    /// Roots first, then dependents.
    pub fn into_processing_order(self) -> Vec<&'a WorkflowTask> {
        let mut ordered = self.roots;
        ordered.extend(self.dependents);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: Option<&[&str]>) -> WorkflowTask {
        WorkflowTask {
            id: id.to_string(),
            dependent_tasks: deps.map(|d| d.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn roots_come_first_and_keep_their_order() {
        let tasks = vec![
            task("c", Some(&["b"])),
            task("a", None),
            task("b", Some(&["a"])),
            task("d", Some(&[])),
        ];
        let order: Vec<&str> = TaskPartition::new(&tasks)
            .into_processing_order()
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        // An empty dependency list counts as a root; chains are not reordered.
        assert_eq!(order, vec!["a", "d", "c", "b"]);
    }
}
