//! Upward mark phase: from kept entities to every operation they need.

use crate::error::GcError;
use crate::graph::{MetaGraph, OperationId};
use crate::keep::KeepSet;
use tracing::info;

/// Result of marking: which operations are kept and which entities were
/// expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    kept: Vec<bool>,
    visited: Vec<bool>,
}

impl Reachability {
    fn new(graph: &MetaGraph) -> Self {
        Self {
            kept: vec![false; graph.operation_count()],
            visited: vec![false; graph.slot_count()],
        }
    }

    pub fn is_kept(&self, operation: OperationId) -> bool {
        self.kept[operation.index()]
    }

    pub fn kept_count(&self) -> usize {
        self.kept.iter().filter(|kept| **kept).count()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|visited| **visited).count()
    }
}

/// Mark every operation transitively required by an entity in `keep`.
///
/// Each entity is expanded at most once. Fails with
/// `UnknownKeptIdentifier` before any marking if a kept identifier is not
/// in the graph.
pub fn mark_reachable(graph: &MetaGraph, keep: &KeepSet) -> Result<Reachability, GcError> {
    let mut stack = keep
        .iter()
        .map(|(id, checkpoint)| {
            graph
                .lookup(id)
                .ok_or_else(|| GcError::UnknownKeptIdentifier {
                    entity: id.to_string(),
                    checkpoint: checkpoint.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut reach = Reachability::new(graph);
    while let Some(slot) = stack.pop() {
        let entity = graph.entity(slot);
        reach.kept[entity.producer().index()] = true;
        if reach.visited[slot.index()] {
            continue;
        }
        reach.visited[slot.index()] = true;
        stack.extend(
            entity
                .inputs()
                .iter()
                .copied()
                .filter(|input| !reach.visited[input.index()]),
        );
    }

    info!(
        kept_identifiers = keep.len(),
        kept_operations = reach.kept_count(),
        visited_entities = reach.visited_count(),
        "marked reachable operations"
    );
    Ok(reach)
}
