//! Read-only presentation projections.
//!
//! # Responsibility
//! - Derive filtered, display-ordered views from the canonical sequence.
//! - Compute aggregate counts for the collaborator's status row.
//!
//! # Invariants
//! - Projections never mutate or reorder the canonical sequence.

pub mod projection;
