//! Garbage reporting: every operation seen minus every operation kept.

use crate::graph::MetaGraph;
use crate::keep::KeepSet;
use crate::mark::Reachability;
use metagc_store::OperationKey;
use serde::Serialize;
use sha2::{Digest, Sha256};

pub const GARBAGE_REPORT_KIND: &str = "metagc.garbage_report.v1";
const GARBAGE_REPORT_SCHEMA: u32 = 1;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GarbageSummary {
    pub version_count: usize,
    pub operation_count: usize,
    pub entity_count: usize,
    pub superseded_entity_count: usize,
    pub kept_identifier_count: usize,
    pub kept_operation_count: usize,
    pub garbage_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GarbageReport {
    pub schema: u32,
    pub report_kind: String,
    pub store_root: String,
    /// Unreachable operation keys, ascending.
    pub garbage: Vec<OperationKey>,
    pub summary: GarbageSummary,
    /// `sha256:` digest of `render_lines()`.
    pub garbage_digest: String,
}

impl GarbageReport {
    pub fn build(
        store_root: &str,
        version_count: usize,
        graph: &MetaGraph,
        keep: &KeepSet,
        reach: &Reachability,
    ) -> Self {
        let mut garbage: Vec<OperationKey> = graph
            .operations()
            .filter(|(id, _)| !reach.is_kept(*id))
            .map(|(_, key)| key.clone())
            .collect();
        garbage.sort();

        let summary = GarbageSummary {
            version_count,
            operation_count: graph.operation_count(),
            entity_count: graph.entity_count(),
            superseded_entity_count: graph.superseded_count(),
            kept_identifier_count: keep.len(),
            kept_operation_count: reach.kept_count(),
            garbage_count: garbage.len(),
        };
        let garbage_digest = garbage_digest(&garbage);

        Self {
            schema: GARBAGE_REPORT_SCHEMA,
            report_kind: GARBAGE_REPORT_KIND.to_string(),
            store_root: store_root.to_string(),
            garbage,
            summary,
            garbage_digest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.garbage.is_empty()
    }

    /// One key per line, each terminated by a newline.
    pub fn render_lines(&self) -> String {
        let mut out = String::new();
        for key in &self.garbage {
            out.push_str(key.as_str());
            out.push('\n');
        }
        out
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn garbage_digest(garbage: &[OperationKey]) -> String {
    let mut hasher = Sha256::new();
    for key in garbage {
        hasher.update(key.as_str().as_bytes());
        hasher.update(b"\n");
    }
    format!("sha256:{:x}", hasher.finalize())
}
