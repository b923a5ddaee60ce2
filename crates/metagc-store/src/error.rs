//! Errors raised while reading the store.

use std::fmt::Display;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A directory or file could not be listed or read.
    #[error("store unreadable: {path}: {message}")]
    Unreadable { path: String, message: String },

    /// An operation record is not valid JSON or lacks `inputs`/`outputs`.
    #[error("malformed operation record: {path}: {message}")]
    MalformedRecord { path: String, message: String },
}

impl StoreError {
    pub(crate) fn unreadable(path: &Path, message: impl Display) -> Self {
        Self::Unreadable {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn malformed(path: &Path, message: impl Display) -> Self {
        Self::MalformedRecord {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
