//! Typed store records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Subdirectory of a version holding operation records.
pub const OPERATIONS_DIR: &str = "operations";
/// Subdirectory of a version holding checkpoint records.
pub const CHECKPOINTS_DIR: &str = "checkpoints";

/// Identity of one operation record: `<version>/<file>`.
///
/// The same file name can appear under several versions. Those are distinct
/// records and never share a key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OperationKey(String);

impl OperationKey {
    pub fn new(version: &str, file: &str) -> Self {
        Self(format!("{version}/{file}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OperationKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed operation record. Only the entity wiring is retained; any other
/// fields the server writes are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OperationRecord {
    /// Input name -> consumed entity identifier.
    pub inputs: BTreeMap<String, String>,
    /// Output name -> produced entity identifier.
    pub outputs: BTreeMap<String, String>,
}

impl OperationRecord {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn input_ids(&self) -> impl Iterator<Item = &str> {
        self.inputs.values().map(String::as_str)
    }

    pub fn output_ids(&self) -> impl Iterator<Item = &str> {
        self.outputs.values().map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct StoredOperation {
    pub key: OperationKey,
    /// File the record was read from, used in diagnostics.
    pub path: PathBuf,
    pub record: OperationRecord,
}

#[derive(Debug, Clone)]
pub struct StoredCheckpoint {
    /// `<version>/<file>`, used in diagnostics.
    pub name: String,
    /// Raw file content, decoded lossily.
    pub content: String,
}

/// Everything one version contributes, operations in file-name order.
#[derive(Debug, Clone)]
pub struct VersionRecords {
    pub version: String,
    pub operations: Vec<StoredOperation>,
    pub checkpoints: Vec<StoredCheckpoint>,
}
