//! # metagc-store
//!
//! Read-only access to a versioned metagraph store.
//!
//! This crate provides:
//! - the canonical entity-identifier matcher
//! - typed operation/checkpoint records
//! - `StoreLoader`, which walks versions in the order the graph builder needs
//!
//! It knows nothing about dependency graphs or reachability. That lives in
//! `metagc-graph`.
//!
//! ## Layout
//!
//! ```text
//! <store-root>/
//!     <version>/operations/<file>    JSON: {"inputs": {..}, "outputs": {..}}
//!     <version>/checkpoints/<file>   opaque text, scanned for identifiers
//! ```
//!
//! Versions, and files inside `operations/`, are visited in ascending
//! lexicographic order. Inputs of an operation must have been produced by an
//! operation visited earlier.

pub mod error;
pub mod guid;
pub mod loader;
pub mod record;

pub use error::StoreError;
pub use guid::find_entity_ids;
pub use loader::{StoreLoader, VersionStream};
pub use record::{
    CHECKPOINTS_DIR, OPERATIONS_DIR, OperationKey, OperationRecord, StoredCheckpoint,
    StoredOperation, VersionRecords,
};
