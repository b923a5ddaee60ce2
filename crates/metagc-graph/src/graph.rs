//! The cross-version entity dependency graph.
//!
//! Entities live in an arena and refer to their inputs by slot. An input
//! slot always precedes the slot referring to it, so the arena is a DAG by
//! construction. When a later operation produces an identifier that already
//! exists, the identifier index moves to the new slot; the old slot stays
//! in the arena because earlier consumers still point at it.

use crate::error::GcError;
use metagc_store::{OperationKey, StoredOperation};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Index of an entity in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntitySlot(usize);

impl EntitySlot {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an operation record in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(usize);

impl OperationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One produced entity together with the entities its operation consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: String,
    producer: OperationId,
    inputs: Vec<EntitySlot>,
}

impl Entity {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn producer(&self) -> OperationId {
        self.producer
    }

    pub fn inputs(&self) -> &[EntitySlot] {
        &self.inputs
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaGraph {
    entities: Vec<Entity>,
    by_id: HashMap<String, EntitySlot>,
    operations: Vec<OperationKey>,
    operation_ids: HashMap<OperationKey, OperationId>,
    superseded: HashSet<String>,
}

impl MetaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one operation record.
    ///
    /// Every input must already resolve to an entity; otherwise the graph is
    /// left unchanged and `DanglingInputReference` is returned. Each output
    /// becomes a new entity and replaces any earlier entity with that id.
    pub fn insert_operation(
        &mut self,
        operation: &StoredOperation,
    ) -> Result<OperationId, GcError> {
        let record = &operation.record;
        let inputs = record
            .input_ids()
            .map(|id| {
                self.lookup(id)
                    .ok_or_else(|| GcError::DanglingInputReference {
                        operation: operation.key.to_string(),
                        path: operation.path.display().to_string(),
                        entity: id.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let producer = self.register_operation(operation.key.clone());
        for id in record.output_ids() {
            let slot = EntitySlot(self.entities.len());
            self.entities.push(Entity {
                id: id.to_string(),
                producer,
                inputs: inputs.clone(),
            });
            if let Some(previous) = self.by_id.insert(id.to_string(), slot)
                && self.superseded.insert(id.to_string())
            {
                warn!(
                    entity = id,
                    previous = %self.operation_key(self.entity(previous).producer),
                    operation = %self.operation_key(producer),
                    "entity produced again; later operation wins"
                );
            }
        }
        Ok(producer)
    }

    fn register_operation(&mut self, key: OperationKey) -> OperationId {
        if let Some(id) = self.operation_ids.get(&key) {
            return *id;
        }
        let id = OperationId(self.operations.len());
        self.operations.push(key.clone());
        self.operation_ids.insert(key, id);
        id
    }

    /// Current entity for `id`, if any operation produced it.
    pub fn lookup(&self, id: &str) -> Option<EntitySlot> {
        self.by_id.get(id).copied()
    }

    pub fn entity(&self, slot: EntitySlot) -> &Entity {
        &self.entities[slot.0]
    }

    pub fn operation_key(&self, id: OperationId) -> &OperationKey {
        &self.operations[id.0]
    }

    /// Every operation seen, in load order.
    pub fn operations(&self) -> impl Iterator<Item = (OperationId, &OperationKey)> {
        self.operations
            .iter()
            .enumerate()
            .map(|(index, key)| (OperationId(index), key))
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Distinct entity identifiers currently resolvable.
    pub fn entity_count(&self) -> usize {
        self.by_id.len()
    }

    /// Arena size, superseded entities included.
    pub fn slot_count(&self) -> usize {
        self.entities.len()
    }

    /// Distinct identifiers produced by more than one operation.
    pub fn superseded_count(&self) -> usize {
        self.superseded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use metagc_store::OperationRecord;
    use std::path::PathBuf;

    fn operation(version: &str, file: &str, inputs: &[&str], outputs: &[&str]) -> StoredOperation {
        let named = |ids: &[&str]| -> BTreeMap<String, String> {
            ids.iter()
                .enumerate()
                .map(|(i, id)| (format!("slot{i}"), id.to_string()))
                .collect()
        };
        StoredOperation {
            key: OperationKey::new(version, file),
            path: PathBuf::from(format!("/store/{version}/operations/{file}")),
            record: OperationRecord {
                inputs: named(inputs),
                outputs: named(outputs),
            },
        }
    }

    #[test]
    fn outputs_link_to_resolved_inputs() {
        let mut graph = MetaGraph::new();
        let source = graph
            .insert_operation(&operation("v1", "a", &[], &["e1"]))
            .expect("source should insert");
        let derived = graph
            .insert_operation(&operation("v1", "b", &["e1"], &["e2", "e3"]))
            .expect("derived should insert");

        let e1 = graph.lookup("e1").expect("e1 exists");
        let e2 = graph.entity(graph.lookup("e2").expect("e2 exists"));
        assert_eq!(graph.entity(e1).producer(), source);
        assert_eq!(e2.producer(), derived);
        assert_eq!(e2.inputs(), &[e1]);
        assert_eq!(graph.entity_count(), 3);
        assert_eq!(graph.operation_count(), 2);
    }

    #[test]
    fn dangling_input_fails_and_leaves_graph_untouched() {
        let mut graph = MetaGraph::new();
        let err = graph
            .insert_operation(&operation("v1", "b", &["e0"], &["e1"]))
            .expect_err("unknown input must fail");
        assert!(matches!(
            err,
            GcError::DanglingInputReference { ref operation, ref entity, ref path }
                if operation == "v1/b" && entity == "e0" && path == "/store/v1/operations/b"
        ));
        assert_eq!(graph.operation_count(), 0);
        assert_eq!(graph.slot_count(), 0);
    }

    #[test]
    fn input_produced_by_same_operation_is_dangling() {
        let mut graph = MetaGraph::new();
        let err = graph
            .insert_operation(&operation("v1", "loop", &["e1"], &["e1"]))
            .expect_err("self-reference without earlier producer must fail");
        assert_eq!(err.class(), crate::FAILURE_CLASS_DANGLING_INPUT);
    }

    #[test]
    fn later_producer_supersedes_earlier() {
        let mut graph = MetaGraph::new();
        let first = graph
            .insert_operation(&operation("v1", "a", &[], &["e1"]))
            .expect("first should insert");
        let consumer = graph
            .insert_operation(&operation("v1", "b", &["e1"], &["e2"]))
            .expect("consumer should insert");
        let second = graph
            .insert_operation(&operation("v2", "a", &[], &["e1"]))
            .expect("second should insert");

        let current = graph.lookup("e1").expect("e1 exists");
        assert_eq!(graph.entity(current).producer(), second);
        assert_eq!(graph.superseded_count(), 1);
        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.slot_count(), 3);

        let e2 = graph.entity(graph.lookup("e2").expect("e2 exists"));
        assert_eq!(e2.producer(), consumer);
        assert_eq!(graph.entity(e2.inputs()[0]).producer(), first);
    }

    #[test]
    fn identifier_produced_three_times_counts_once() {
        let mut graph = MetaGraph::new();
        for version in ["v1", "v2", "v3"] {
            graph
                .insert_operation(&operation(version, "a", &[], &["e1"]))
                .expect("producer should insert");
        }
        graph
            .insert_operation(&operation("v3", "b", &[], &["e2"]))
            .expect("producer should insert");

        assert_eq!(graph.superseded_count(), 1);
        assert_eq!(graph.slot_count(), 4);
        let current = graph.entity(graph.lookup("e1").expect("e1 exists"));
        assert_eq!(graph.operation_key(current.producer()).as_str(), "v3/a");
    }

    #[test]
    fn operation_without_outputs_is_still_registered() {
        let mut graph = MetaGraph::new();
        graph
            .insert_operation(&operation("v1", "noop", &[], &[]))
            .expect("empty operation should insert");
        let keys: Vec<&str> = graph.operations().map(|(_, key)| key.as_str()).collect();
        assert_eq!(keys, vec!["v1/noop"]);
    }
}
