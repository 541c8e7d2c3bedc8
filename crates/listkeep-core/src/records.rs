//! Record kinds and their drafts.
//!
//! The two CRUD surfaces (tasks and todos) are near-identical flows over
//! different field sets. [`RecordKind`] captures the difference — wire
//! paths, id extraction, draft validation — so the remote store and
//! synchronizer can be written once, generically.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, StoreError};

/// A kind of record the remote API serves.
///
/// `Record` is the server-authoritative shape (including the
/// server-assigned id); `Draft` is the subset of fields the client is
/// allowed to write. The id never appears in a draft, so a client can
/// never assert one.
pub trait RecordKind: Send + Sync + 'static {
    /// Server-authoritative record shape.
    type Record: Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Client-writable field set.
    type Draft: Clone + std::fmt::Debug + Serialize + Send + Sync + 'static;

    /// Kind name for logs and prompts ("task", "todo").
    const NAME: &'static str;
    /// Collection endpoint path (list / create).
    const COLLECTION_PATH: &'static str;
    /// Single-item endpoint path (fetch / update / delete, `?id={id}`).
    const ITEM_PATH: &'static str;

    /// The server-assigned id of a record.
    fn record_id(record: &Self::Record) -> i64;

    /// Snapshot a record's editable fields into a draft (entering edit mode).
    fn draft_of(record: &Self::Record) -> Self::Draft;

    /// Reject drafts with empty required fields before any network call.
    fn validate(draft: &Self::Draft) -> Result<()>;

    /// Canonical form of a draft as sent on the wire.
    fn normalize(draft: Self::Draft) -> Self::Draft {
        draft
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Task
// ─────────────────────────────────────────────────────────────────────────────

/// A task record as served by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned id, immutable once created.
    pub id: i64,
    /// Short summary line.
    pub title: String,
    /// Free-form description.
    pub description: String,
}

/// Client-writable task fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    /// Short summary line. Required.
    pub title: String,
    /// Free-form description. Required.
    pub description: String,
}

impl TaskDraft {
    /// Draft from owned field values.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The task record kind.
pub struct TaskKind;

impl RecordKind for TaskKind {
    type Record = Task;
    type Draft = TaskDraft;

    const NAME: &'static str = "task";
    const COLLECTION_PATH: &'static str = "/api/tasks";
    const ITEM_PATH: &'static str = "/api/task";

    fn record_id(record: &Task) -> i64 {
        record.id
    }

    fn draft_of(record: &Task) -> TaskDraft {
        TaskDraft {
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }

    fn validate(draft: &TaskDraft) -> Result<()> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::Validation("task title is required".to_string()));
        }
        if draft.description.trim().is_empty() {
            return Err(StoreError::Validation(
                "task description is required".to_string(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Todo
// ─────────────────────────────────────────────────────────────────────────────

/// A todo record as served by the API.
///
/// Both timestamps are server-assigned and read-only to the client; they
/// are never part of a draft, so an update can never overwrite them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Server-assigned id, immutable once created.
    pub id: i64,
    /// The todo text.
    pub text: String,
    /// Set by the server on creation.
    pub created_at: DateTime<Utc>,
    /// Bumped by the server on every update.
    pub updated_at: DateTime<Utc>,
}

/// Client-writable todo fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoDraft {
    /// The todo text. Required; trimmed before send.
    pub text: String,
}

impl TodoDraft {
    /// Draft from an owned text value.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The todo record kind.
pub struct TodoKind;

impl RecordKind for TodoKind {
    type Record = Todo;
    type Draft = TodoDraft;

    const NAME: &'static str = "todo";
    const COLLECTION_PATH: &'static str = "/api/todos";
    const ITEM_PATH: &'static str = "/api/todo";

    fn record_id(record: &Todo) -> i64 {
        record.id
    }

    fn draft_of(record: &Todo) -> TodoDraft {
        TodoDraft {
            text: record.text.clone(),
        }
    }

    fn validate(draft: &TodoDraft) -> Result<()> {
        if draft.text.trim().is_empty() {
            return Err(StoreError::Validation("todo text is required".to_string()));
        }
        Ok(())
    }

    fn normalize(draft: TodoDraft) -> TodoDraft {
        TodoDraft {
            text: draft.text.trim().to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
