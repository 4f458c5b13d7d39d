//! Task record and text validation.
//!
//! # Responsibility
//! - Define the canonical task shape serialized to storage.
//! - Provide the single validation gate for user-entered text.
//!
//! # Invariants
//! - `id` never changes after creation and is unique within a collection.
//! - `updated_at` is never earlier than `created_at`.
//! - Text accepted by `validate_text` is trimmed and 3..=100 characters long.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Minimum accepted task text length in characters, after trimming.
pub const TEXT_MIN_CHARS: usize = 3;

/// Maximum accepted task text length in characters, after trimming.
pub const TEXT_MAX_CHARS: usize = 100;

/// Stable opaque identifier for a task.
///
/// Kept as a `String` alias: freshly generated ids follow the
/// `task_<epoch_ms>_<suffix>` shape, but ids restored from older stored data
/// may have any non-empty form and must survive round-trips unchanged.
pub type TaskId = String;

/// Generates a collision-resistant task id.
///
/// Time-based prefix plus random UUID suffix. No counter is involved, so ids
/// stay unique across independent application launches.
pub fn generate_task_id() -> TaskId {
    format!(
        "task_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Validation failure for user-entered task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextValidationError {
    /// Trimmed text is empty.
    EmptyText,
    /// Trimmed text is shorter than [`TEXT_MIN_CHARS`].
    TooShort { len: usize },
    /// Trimmed text is longer than [`TEXT_MAX_CHARS`].
    TooLong { len: usize },
}

impl Display for TextValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "Task cannot be empty"),
            Self::TooShort { .. } => {
                write!(f, "Task must be at least {TEXT_MIN_CHARS} characters")
            }
            Self::TooLong { .. } => {
                write!(f, "Task cannot exceed {TEXT_MAX_CHARS} characters")
            }
        }
    }
}

impl Error for TextValidationError {}

/// Checks user-entered task text and returns the trimmed form.
///
/// Length is counted in Unicode scalar values. The returned string is the
/// exact value a task may carry; callers must not re-trim or re-shape it.
///
/// # Errors
/// - `EmptyText` when the trimmed text has zero length.
/// - `TooShort` when it has fewer than [`TEXT_MIN_CHARS`] characters.
/// - `TooLong` when it has more than [`TEXT_MAX_CHARS`] characters.
pub fn validate_text(raw: &str) -> Result<String, TextValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return Err(TextValidationError::EmptyText);
    }
    if len < TEXT_MIN_CHARS {
        return Err(TextValidationError::TooShort { len });
    }
    if len > TEXT_MAX_CHARS {
        return Err(TextValidationError::TooLong { len });
    }

    Ok(trimmed.to_string())
}

/// Canonical task record.
///
/// Wire field names are camelCase to stay compatible with data written by
/// earlier releases; see the persistence layer for the legacy aliases
/// accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable opaque id used for lookup and reordering.
    pub id: TaskId,
    /// User-visible content. Validated on every service write path.
    pub text: String,
    /// Completion flag toggled by the user.
    pub completed: bool,
    /// Creation instant. Serialized as an RFC 3339 string.
    pub created_at: DateTime<Utc>,
    /// Last-mutation instant. Refreshed by every edit except reordering.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a not-yet-completed task with a generated id.
    ///
    /// `created_at` and `updated_at` start at the same instant.
    pub fn new(text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_task_id(),
            text: text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at` to the current instant.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Returns whether this task still needs doing.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
