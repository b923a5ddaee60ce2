//! # metagc-graph
//!
//! Decides which operation records of a metagraph store are garbage.
//!
//! ```text
//! StoreLoader ──▶ MetaGraph (entity arena, last producer wins)
//!      │                │
//!      └──▶ KeepSet ────┴──▶ mark_reachable ──▶ GarbageReport
//! ```
//!
//! An operation is kept exactly when one of its outputs is named by a
//! checkpoint, or feeds (transitively) an entity that is. Everything else
//! the store holds is reported. Nothing here deletes anything.

pub mod error;
pub mod graph;
pub mod keep;
pub mod mark;
pub mod report;
pub mod run;

pub use error::{
    FAILURE_CLASS_DANGLING_INPUT, FAILURE_CLASS_MALFORMED_RECORD, FAILURE_CLASS_STORE_UNREADABLE,
    FAILURE_CLASS_UNKNOWN_KEPT_IDENTIFIER, GcError,
};
pub use graph::{Entity, EntitySlot, MetaGraph, OperationId};
pub use keep::KeepSet;
pub use mark::{Reachability, mark_reachable};
pub use report::{GARBAGE_REPORT_KIND, GarbageReport, GarbageSummary};
pub use run::{CollectionRun, collect_garbage};
