//! Task use-case service.
//!
//! # Responsibility
//! - Own the canonical ordered task sequence and the current filter.
//! - Apply every mutation, persist it in the same step, and notify the
//!   presentation collaborator.
//!
//! # Invariants
//! - The sequence is mutated only through this service; collaborators read
//!   snapshots.
//! - Text entering the sequence has passed `validate_text`, on the create
//!   and the edit path alike.
//! - A missing id in toggle/update/delete/reorder is a silent no-op.
//! - Persistence failures never abort an applied mutation.

use crate::model::task::{validate_text, Task};
use crate::repo::task_store::TaskStore;
use crate::service::ui_bridge::UiBridge;
use crate::view::projection::{project, stats, TaskFilter, TaskStats};
use log::{debug, info, warn};

const DELETE_PROMPT: &str = "Delete this task?";
const CLEAR_COMPLETED_PROMPT: &str = "Clear all completed tasks?";

/// Owner of the canonical task sequence.
///
/// Constructed once at application start and handed by reference to the UI
/// layer; there is no other holder of mutable task state.
pub struct TaskService<S: TaskStore, U: UiBridge> {
    store: S,
    ui: U,
    tasks: Vec<Task>,
    filter: TaskFilter,
}

impl<S: TaskStore, U: UiBridge> TaskService<S, U> {
    /// Creates a service and loads the persisted sequence from `store`.
    pub fn new(store: S, ui: U) -> Self {
        let tasks = store.load();
        info!(
            "event=service_init module=service status=ok loaded={}",
            tasks.len()
        );

        Self {
            store,
            ui,
            tasks,
            filter: TaskFilter::default(),
        }
    }

    /// Creates a task from user input and inserts it at the front of the
    /// sequence, so the newest entry leads the canonical order.
    ///
    /// Invalid text is reported through the bridge and leaves the sequence
    /// untouched. Returns whether the task was created.
    pub fn create(&mut self, raw_text: &str) -> bool {
        let text = match validate_text(raw_text) {
            Ok(text) => text,
            Err(err) => {
                self.ui.report_validation_error(&err.to_string());
                return false;
            }
        };

        self.tasks.insert(0, Task::new(text));
        debug!("event=task_create module=service status=ok");
        self.persist();
        self.rerender();
        true
    }

    /// Flips the completion flag of the task with `id`.
    pub fn toggle_complete(&mut self, id: &str) {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return;
        };

        task.completed = !task.completed;
        task.touch();
        self.persist();
        self.rerender();
    }

    /// Replaces the text of the task with `id`.
    ///
    /// The new text passes the same validation gate as `create`; callers do
    /// not need to pre-validate. Returns whether the edit was applied.
    pub fn update_text(&mut self, id: &str, raw_text: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let text = match validate_text(raw_text) {
            Ok(text) => text,
            Err(err) => {
                self.ui.report_validation_error(&err.to_string());
                return false;
            }
        };

        let task = &mut self.tasks[index];
        task.text = text;
        task.touch();
        self.persist();
        self.rerender();
        true
    }

    /// Removes the task with `id`, gated by collaborator confirmation.
    pub fn delete(&mut self, id: &str) {
        let Some(index) = self.position(id) else {
            return;
        };
        if !self.ui.confirm_destructive_action(DELETE_PROMPT) {
            return;
        }

        self.tasks.remove(index);
        debug!("event=task_delete module=service status=ok");
        self.persist();
        self.rerender();
    }

    /// Moves the dragged task to the target's slot.
    ///
    /// Rule: the dragged task is removed first and reinserted at the
    /// target's post-removal index, landing immediately before the target
    /// regardless of drag direction. Equal or unknown ids are a no-op.
    /// Reordering does not count as a content mutation, so `updated_at`
    /// stays untouched.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) {
        if dragged_id == target_id {
            return;
        }
        let (Some(from), Some(_)) = (self.position(dragged_id), self.position(target_id)) else {
            return;
        };

        let dragged = self.tasks.remove(from);
        let to = self.position(target_id).unwrap_or(from);
        self.tasks.insert(to, dragged);
        self.persist();
        self.rerender();
    }

    /// Drops every completed task, gated by collaborator confirmation.
    ///
    /// When nothing is completed the collaborator is not even prompted and
    /// the sequence stays untouched, so repeated calls are idempotent.
    pub fn clear_completed(&mut self) {
        if self.tasks.iter().all(Task::is_active) {
            return;
        }
        if !self.ui.confirm_destructive_action(CLEAR_COMPLETED_PROMPT) {
            return;
        }

        self.tasks = self.store.clear_completed(&self.tasks);
        debug!("event=task_clear_completed module=service status=ok");
        self.rerender();
    }

    /// Switches the current display filter. Not persisted.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.rerender();
    }

    /// Read-only snapshot of the canonical sequence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Currently selected display filter.
    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Display view for the current filter.
    pub fn visible_tasks(&self) -> Vec<Task> {
        project(&self.tasks, self.filter)
    }

    /// Aggregate counts over the full sequence.
    pub fn stats(&self) -> TaskStats {
        stats(&self.tasks)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.tasks) {
            warn!("event=task_save module=service status=degraded error={err}");
        }
    }

    fn rerender(&self) {
        self.ui.request_rerender(&self.tasks, self.filter);
    }
}
