//! Keep-set extraction from checkpoint text.

use metagc_store::{StoredCheckpoint, find_entity_ids};
use std::collections::BTreeMap;

/// Entity identifiers that must stay reachable, each remembered with the
/// first checkpoint (in load order) that named it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepSet {
    ids: BTreeMap<String, String>,
}

impl KeepSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `content` for identifiers and add them, attributed to
    /// `checkpoint`. Returns how many identifiers were new.
    pub fn extend_from_text(&mut self, checkpoint: &str, content: &str) -> usize {
        let mut added = 0;
        for id in find_entity_ids(content) {
            if !self.ids.contains_key(id) {
                self.ids.insert(id.to_string(), checkpoint.to_string());
                added += 1;
            }
        }
        added
    }

    /// Scan every checkpoint in order. Returns how many identifiers were new.
    pub fn extend_from_checkpoints<'a>(
        &mut self,
        checkpoints: impl IntoIterator<Item = &'a StoredCheckpoint>,
    ) -> usize {
        checkpoints
            .into_iter()
            .map(|checkpoint| self.extend_from_text(&checkpoint.name, &checkpoint.content))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `(identifier, first checkpoint naming it)` in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids
            .iter()
            .map(|(id, checkpoint)| (id.as_str(), checkpoint.as_str()))
    }
}
