//! Outward contract between the core and its presentation collaborator.
//!
//! # Responsibility
//! - Declare the callbacks the task service invokes on the UI layer.
//!
//! # Invariants
//! - The core never renders; it announces state changes and asks for
//!   confirmation exclusively through this trait.

use crate::model::task::Task;
use crate::view::projection::TaskFilter;

/// Callbacks the task service invokes on its presentation collaborator.
///
/// Implementations must not call back into the service from within these
/// methods; every operation runs to completion before the next begins.
pub trait UiBridge {
    /// Shows a validation failure message to the user.
    fn report_validation_error(&self, message: &str);

    /// Asks the collaborator to refresh its presentation.
    ///
    /// `tasks` is the full canonical sequence; the collaborator derives its
    /// display view through the projection functions.
    fn request_rerender(&self, tasks: &[Task], filter: TaskFilter);

    /// Gates a destructive operation. Returning `false` aborts it.
    fn confirm_destructive_action(&self, prompt: &str) -> bool;
}

impl<U: UiBridge + ?Sized> UiBridge for &U {
    fn report_validation_error(&self, message: &str) {
        (**self).report_validation_error(message);
    }

    fn request_rerender(&self, tasks: &[Task], filter: TaskFilter) {
        (**self).request_rerender(tasks, filter);
    }

    fn confirm_destructive_action(&self, prompt: &str) -> bool {
        (**self).confirm_destructive_action(prompt)
    }
}
