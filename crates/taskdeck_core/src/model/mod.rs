//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record owned by the service layer.
//! - Enforce the text contract shared by the create and edit paths.
//!
//! # Invariants
//! - Every task is identified by a stable, opaque `TaskId`.
//! - Deletion is a hard removal from the collection; there is no tombstone.

pub mod task;
