//! One collection run over a store.

use crate::error::GcError;
use crate::graph::MetaGraph;
use crate::keep::KeepSet;
use crate::mark::mark_reachable;
use crate::report::GarbageReport;
use metagc_store::{StoreLoader, VersionRecords};
use std::path::Path;
use tracing::{debug, info};

/// State owned by a single run. Versions must be ingested in store order;
/// nothing outlives the run.
#[derive(Debug, Clone)]
pub struct CollectionRun {
    store_root: String,
    graph: MetaGraph,
    keep: KeepSet,
    version_count: usize,
}

impl CollectionRun {
    pub fn new(store_root: impl Into<String>) -> Self {
        Self {
            store_root: store_root.into(),
            graph: MetaGraph::new(),
            keep: KeepSet::new(),
            version_count: 0,
        }
    }

    /// Load every version `loader` yields, in order.
    pub fn load(loader: &StoreLoader) -> Result<Self, GcError> {
        let mut run = Self::new(loader.root().display().to_string());
        for records in loader.stream()? {
            run.ingest_version(records?)?;
        }
        info!(
            versions = run.version_count,
            operations = run.graph.operation_count(),
            entities = run.graph.entity_count(),
            superseded = run.graph.superseded_count(),
            kept_identifiers = run.keep.len(),
            "loaded store"
        );
        Ok(run)
    }

    /// Add one version: operations into the graph in file order, then its
    /// checkpoints into the keep-set.
    pub fn ingest_version(&mut self, records: VersionRecords) -> Result<(), GcError> {
        for operation in &records.operations {
            self.graph.insert_operation(operation)?;
        }
        let added = self.keep.extend_from_checkpoints(&records.checkpoints);
        debug!(
            version = %records.version,
            operations = records.operations.len(),
            kept_identifiers_added = added,
            "ingested version"
        );
        self.version_count += 1;
        Ok(())
    }

    /// Mark from the keep-set and report everything left unmarked.
    pub fn finish(self) -> Result<GarbageReport, GcError> {
        let reach = mark_reachable(&self.graph, &self.keep)?;
        Ok(GarbageReport::build(
            &self.store_root,
            self.version_count,
            &self.graph,
            &self.keep,
            &reach,
        ))
    }
}

/// Compute the garbage set of the store at `root`.
pub fn collect_garbage(root: impl AsRef<Path>) -> Result<GarbageReport, GcError> {
    let loader = StoreLoader::new(root.as_ref());
    CollectionRun::load(&loader)?.finish()
}
