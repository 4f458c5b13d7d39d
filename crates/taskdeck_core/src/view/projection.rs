//! Filtered/sorted task views and aggregate counts.
//!
//! # Responsibility
//! - Select the subset of tasks matching a filter.
//! - Order the subset for display: open work first, newest first within the
//!   same completion state.
//!
//! # Invariants
//! - Pure functions over a snapshot; input order is never touched.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// Subset selector for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks still to do.
    Active,
    /// Tasks already done.
    Completed,
}

impl TaskFilter {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Aggregate counts over the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Derives the display view for one filter.
///
/// Selection: `Active` keeps open tasks, `Completed` keeps done tasks, `All`
/// keeps everything. The selected subset is then stably sorted with open
/// tasks before completed ones and, within the same completion state, newer
/// `created_at` first.
pub fn project(tasks: &[Task], filter: TaskFilter) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|task| match filter {
            TaskFilter::All => true,
            TaskFilter::Active => task.is_active(),
            TaskFilter::Completed => task.completed,
        })
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    selected
}

/// Computes aggregate counts. `active + completed == total` always holds.
pub fn stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();

    TaskStats {
        total,
        active: total - completed,
        completed,
    }
}
