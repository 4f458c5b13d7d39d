//! Persistence layer abstractions and the SQLite key-value implementation.
//!
//! # Responsibility
//! - Define the storage contract for the ordered task sequence.
//! - Isolate serialization, fallback and legacy-migration details from the
//!   service layer.
//!
//! # Invariants
//! - The in-memory sequence held by the service stays authoritative for the
//!   running session even when every storage surface fails.
//! - Loaded records always pass through legacy migration before they are
//!   handed to the service.

pub mod task_store;
