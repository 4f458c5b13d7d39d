//! Task persistence contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Persist the full ordered task sequence under one fixed key.
//! - Fall back from the durable surface to the session surface on write
//!   failure, and keep load failures non-fatal.
//! - Upgrade legacy stored records to the current task shape.
//!
//! # Invariants
//! - `save` writes the complete sequence or nothing; there is no partial or
//!   per-task write path.
//! - `load` never fails: a degraded or malformed surface yields an empty
//!   list and a log line.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::model::task::{generate_task_id, Task};
use chrono::{DateTime, Utc};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Fixed namespaced key under which the task sequence is persisted.
///
/// Both surfaces share this key and the value format: a JSON array of task
/// records.
pub const TASKS_KEY: &str = "taskdeck_tasks_v2";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for the task sequence.
#[derive(Debug)]
pub enum StoreError {
    /// The sequence could not be serialized; no write was attempted.
    Serialize(serde_json::Error),
    /// Durable and session surfaces both rejected the write.
    WriteFailed { primary: String, session: String },
    /// A storage surface could not be read.
    ReadFailed(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "task serialization failed: {err}"),
            Self::WriteFailed { primary, session } => write!(
                f,
                "task save failed on all surfaces: primary: {primary}; session: {session}"
            ),
            Self::ReadFailed(err) => write!(f, "task load failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::WriteFailed { .. } => None,
            Self::ReadFailed(err) => Some(err),
        }
    }
}

/// Persistence contract for the ordered task sequence.
pub trait TaskStore {
    /// Persists the full ordered sequence.
    ///
    /// # Errors
    /// Returns `WriteFailed` only when every surface rejected the write.
    /// Callers log it and continue; the in-memory sequence stays
    /// authoritative for the session.
    fn save(&self, tasks: &[Task]) -> StoreResult<()>;

    /// Loads the persisted sequence.
    ///
    /// Missing key, unreadable surface or malformed payload all degrade to
    /// an empty list.
    fn load(&self) -> Vec<Task>;

    /// Drops completed tasks, persists the remainder and returns it.
    ///
    /// Relative order of the remaining tasks is preserved. A failed persist
    /// is logged and does not block the returned sequence.
    fn clear_completed(&self, tasks: &[Task]) -> Vec<Task> {
        let active: Vec<Task> = tasks.iter().filter(|task| !task.completed).cloned().collect();
        if let Err(err) = self.save(&active) {
            warn!("event=store_clear_completed module=repo status=degraded error={err}");
        }
        active
    }
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        (**self).save(tasks)
    }

    fn load(&self) -> Vec<Task> {
        (**self).load()
    }

    fn clear_completed(&self, tasks: &[Task]) -> Vec<Task> {
        (**self).clear_completed(tasks)
    }
}

/// SQLite-backed task store with a durable primary surface and a
/// session-scoped in-memory fallback.
pub struct SqliteTaskStore {
    primary: Option<Connection>,
    session: Connection,
}

impl SqliteTaskStore {
    /// Opens the durable surface at `path` plus the session fallback.
    ///
    /// A primary that cannot be opened is logged and left out; the store
    /// then serves the session surface only, so the running session keeps
    /// working and only cross-restart durability is lost.
    ///
    /// # Errors
    /// Returns an error only when the session surface itself cannot be set
    /// up.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let primary = match open_db(path) {
            Ok(conn) => Some(conn),
            Err(err) => {
                warn!("event=store_open module=repo status=degraded surface=primary error={err}");
                None
            }
        };
        Ok(Self::new(primary, open_db_in_memory()?))
    }

    /// Builds a store from pre-opened connections.
    ///
    /// `primary: None` models an unavailable durable surface; every write
    /// then lands on the session surface directly.
    pub fn new(primary: Option<Connection>, session: Connection) -> Self {
        Self { primary, session }
    }

    /// Fully in-memory store for tests and ephemeral sessions.
    ///
    /// # Errors
    /// Returns an error when an in-memory surface cannot be set up.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(Some(open_db_in_memory()?), open_db_in_memory()?))
    }

    fn read_raw(&self) -> StoreResult<Option<String>> {
        if let Some(conn) = &self.primary {
            let value =
                read_value(conn).map_err(|err| StoreError::ReadFailed(DbError::Sqlite(err)))?;
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                return Ok(Some(value));
            }
        }

        let value =
            read_value(&self.session).map_err(|err| StoreError::ReadFailed(DbError::Sqlite(err)))?;
        Ok(value.filter(|value| !value.is_empty()))
    }
}

impl TaskStore for SqliteTaskStore {
    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let payload = serde_json::to_string(tasks).map_err(StoreError::Serialize)?;

        let primary_error = match &self.primary {
            Some(conn) => match write_value(conn, &payload) {
                Ok(()) => return Ok(()),
                Err(err) => err.to_string(),
            },
            None => "surface unavailable".to_string(),
        };

        warn!("event=store_save module=repo status=fallback error={primary_error}");
        match write_value(&self.session, &payload) {
            Ok(()) => Ok(()),
            Err(err) => Err(StoreError::WriteFailed {
                primary: primary_error,
                session: err.to_string(),
            }),
        }
    }

    fn load(&self) -> Vec<Task> {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=store_load module=repo status=degraded error={err}");
                return Vec::new();
            }
        };

        parse_payload(&raw)
    }
}

fn write_value(conn: &Connection, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, strftime('%s', 'now') * 1000)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![TASKS_KEY, value],
    )?;
    Ok(())
}

fn read_value(conn: &Connection) -> Result<Option<String>, rusqlite::Error> {
    conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1;",
        [TASKS_KEY],
        |row| row.get(0),
    )
    .optional()
}

fn parse_payload(raw: &str) -> Vec<Task> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=store_load module=repo status=malformed error={err}");
            return Vec::new();
        }
    };

    match parsed {
        Value::Array(records) => records.iter().filter_map(migrate_record).collect(),
        _ => {
            warn!("event=store_load module=repo status=malformed error=payload_not_an_array");
            Vec::new()
        }
    }
}

/// Upgrades one loosely-typed stored record into the current task shape.
///
/// Accepts the current schema plus the previous one, which used `title` for
/// the text and `done` for the completion flag. Non-object records are
/// rejected with `None`; within an object every missing field is backfilled:
/// a fresh id, empty text, `completed = false`, current-time timestamps.
pub fn migrate_record(raw: &Value) -> Option<Task> {
    let record = raw.as_object()?;

    let id = string_field(record, "id").unwrap_or_else(generate_task_id);
    let text = string_field(record, "text")
        .or_else(|| string_field(record, "title"))
        .unwrap_or_default();
    let completed = bool_field(record, "completed") || bool_field(record, "done");

    let now = Utc::now();
    let created_at = time_field(record, "createdAt").unwrap_or(now);
    let updated_at = time_field(record, "updatedAt").unwrap_or(now);

    Some(Task {
        id,
        text,
        completed,
        created_at,
        updated_at,
    })
}

fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn bool_field(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn time_field(record: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    record
        .get(key)
        .and_then(Value::as_str)
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|value| value.with_timezone(&Utc))
}
