//! Core domain logic for Taskdeck, a client-side task-list manager.
//! This crate is the single source of truth for task invariants; the UI
//! layer calls in through the service operations and is called back through
//! the [`UiBridge`] trait.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    generate_task_id, validate_text, Task, TaskId, TextValidationError, TEXT_MAX_CHARS,
    TEXT_MIN_CHARS,
};
pub use repo::task_store::{
    migrate_record, SqliteTaskStore, StoreError, StoreResult, TaskStore, TASKS_KEY,
};
pub use service::task_service::TaskService;
pub use service::ui_bridge::UiBridge;
pub use view::projection::{project, stats, TaskFilter, TaskStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
