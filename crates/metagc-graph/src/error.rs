//! Failure kinds of a collection run. Every one of them aborts the run.

use metagc_store::StoreError;

pub const FAILURE_CLASS_STORE_UNREADABLE: &str = "gc.store.unreadable";
pub const FAILURE_CLASS_MALFORMED_RECORD: &str = "gc.record.malformed";
pub const FAILURE_CLASS_DANGLING_INPUT: &str = "gc.graph.dangling_input";
pub const FAILURE_CLASS_UNKNOWN_KEPT_IDENTIFIER: &str = "gc.keep.unknown_identifier";

#[derive(Debug, thiserror::Error)]
pub enum GcError {
    /// A store path, version directory or record file could not be read.
    #[error("store unreadable: {path}: {message}")]
    StoreUnreadable { path: String, message: String },

    /// An operation record is invalid JSON or lacks `inputs`/`outputs`.
    #[error("malformed operation record: {path}: {message}")]
    MalformedRecord { path: String, message: String },

    /// An operation consumes an entity no earlier-loaded operation produced.
    #[error(
        "dangling input reference: operation {operation} ({path}) consumes {entity}, which no earlier operation produces"
    )]
    DanglingInputReference {
        operation: String,
        path: String,
        entity: String,
    },

    /// A checkpoint names an entity no loaded operation produces.
    #[error(
        "unknown kept identifier: {entity} (named by checkpoint {checkpoint}) is not produced by any operation"
    )]
    UnknownKeptIdentifier { entity: String, checkpoint: String },
}

impl GcError {
    /// Stable machine-readable failure class.
    pub fn class(&self) -> &'static str {
        match self {
            Self::StoreUnreadable { .. } => FAILURE_CLASS_STORE_UNREADABLE,
            Self::MalformedRecord { .. } => FAILURE_CLASS_MALFORMED_RECORD,
            Self::DanglingInputReference { .. } => FAILURE_CLASS_DANGLING_INPUT,
            Self::UnknownKeptIdentifier { .. } => FAILURE_CLASS_UNKNOWN_KEPT_IDENTIFIER,
        }
    }
}

impl From<StoreError> for GcError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unreadable { path, message } => Self::StoreUnreadable { path, message },
            StoreError::MalformedRecord { path, message } => {
                Self::MalformedRecord { path, message }
            }
        }
    }
}
