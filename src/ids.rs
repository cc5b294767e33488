//! Identifier generation for compiled canvas elements.

use crate::canvas::CanvasNodeType;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh identifiers. Implementations must never hand out the same
/// id twice, within one compile or across compiles.
pub trait IdGenerator: Send + Sync {
    /// A globally unique entity id for a node of the given type.
    fn node_entity_id(&self, node_type: CanvasNodeType) -> String;

    /// A generic unique id, used for node and edge ids.
    fn unique_id(&self) -> String;
}

fn entity_prefix(node_type: CanvasNodeType) -> &'static str {
    match node_type {
        CanvasNodeType::SkillResponse => "ar",
        CanvasNodeType::Start => "start",
    }
}

/// The default generator, backed by random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn node_entity_id(&self, node_type: CanvasNodeType) -> String {
        format!("{}-{}", entity_prefix(node_type), Uuid::new_v4().simple())
    }

    fn unique_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Hands out `ar-1`, `ar-2`, ... from one shared counter. Ids are unique per
/// generator instance, which makes compiles reproducible in tests and tooling.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn node_entity_id(&self, node_type: CanvasNodeType) -> String {
        format!("{}-{}", entity_prefix(node_type), self.bump())
    }

    fn unique_id(&self) -> String {
        self.bump().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_never_repeats() {
        let ids = UuidIdGenerator;
        let seen: HashSet<String> = (0..256)
            .map(|_| ids.node_entity_id(CanvasNodeType::SkillResponse))
            .collect();
        assert_eq!(seen.len(), 256);
        assert!(seen.iter().all(|id| id.starts_with("ar-")));
    }

    #[test]
    fn sequential_generator_shares_one_counter() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.node_entity_id(CanvasNodeType::SkillResponse), "ar-1");
        assert_eq!(ids.unique_id(), "2");
        assert_eq!(ids.node_entity_id(CanvasNodeType::Start), "start-3");
    }
}
