//! Version-ordered store traversal.

use crate::error::StoreError;
use crate::record::{
    CHECKPOINTS_DIR, OPERATIONS_DIR, OperationKey, OperationRecord, StoredCheckpoint,
    StoredOperation, VersionRecords,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;
use tracing::debug;

/// Reads a store rooted at one directory.
#[derive(Debug, Clone)]
pub struct StoreLoader {
    root: PathBuf,
}

impl StoreLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Version names in ascending lexicographic order.
    ///
    /// Every entry at the store root must be a version directory.
    pub fn versions(&self) -> Result<Vec<String>, StoreError> {
        let versions = sorted_entry_names(&self.root)?;
        for version in &versions {
            let path = self.root.join(version);
            if !path.is_dir() {
                return Err(StoreError::unreadable(&path, "not a version directory"));
            }
        }
        Ok(versions)
    }

    /// Load one version: every operation record (parsed, in file-name order)
    /// and every checkpoint record (raw).
    pub fn load_version(&self, version: &str) -> Result<VersionRecords, StoreError> {
        let version_dir = self.root.join(version);

        let operations_dir = version_dir.join(OPERATIONS_DIR);
        let mut operations = Vec::new();
        for file in sorted_entry_names(&operations_dir)? {
            let path = operations_dir.join(&file);
            let bytes = fs::read(&path).map_err(|e| StoreError::unreadable(&path, e))?;
            let record =
                OperationRecord::from_slice(&bytes).map_err(|e| StoreError::malformed(&path, e))?;
            operations.push(StoredOperation {
                key: OperationKey::new(version, &file),
                path,
                record,
            });
        }

        let checkpoints_dir = version_dir.join(CHECKPOINTS_DIR);
        let mut checkpoints = Vec::new();
        for file in sorted_entry_names(&checkpoints_dir)? {
            let path = checkpoints_dir.join(&file);
            let bytes = fs::read(&path).map_err(|e| StoreError::unreadable(&path, e))?;
            checkpoints.push(StoredCheckpoint {
                name: format!("{version}/{file}"),
                content: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        debug!(
            version,
            operations = operations.len(),
            checkpoints = checkpoints.len(),
            "loaded version"
        );

        Ok(VersionRecords {
            version: version.to_string(),
            operations,
            checkpoints,
        })
    }

    /// Stream versions in load order. The version list is read up front;
    /// each version's records are read when the stream reaches it.
    pub fn stream(&self) -> Result<VersionStream<'_>, StoreError> {
        Ok(VersionStream {
            loader: self,
            versions: self.versions()?.into_iter(),
        })
    }
}

/// Iterator over a store's versions in ascending order.
#[derive(Debug)]
pub struct VersionStream<'a> {
    loader: &'a StoreLoader,
    versions: vec::IntoIter<String>,
}

impl Iterator for VersionStream<'_> {
    type Item = Result<VersionRecords, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let version = self.versions.next()?;
        Some(self.loader.load_version(&version))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.versions.size_hint()
    }
}

fn sorted_entry_names(dir: &Path) -> Result<Vec<String>, StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::unreadable(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::unreadable(dir, e))?;
        let name = entry.file_name().into_string().map_err(|raw| {
            StoreError::unreadable(dir, format!("non-UTF-8 entry name {raw:?}"))
        })?;
        names.push(name);
    }
    names.sort();
    Ok(names)
}
