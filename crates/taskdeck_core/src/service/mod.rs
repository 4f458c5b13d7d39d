//! Core use-case services.
//!
//! # Responsibility
//! - Own the canonical in-memory task sequence and its mutation operations.
//! - Keep the presentation layer decoupled behind the [`ui_bridge::UiBridge`]
//!   trait.

pub mod task_service;
pub mod ui_bridge;
