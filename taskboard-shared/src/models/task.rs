/// Task model
///
/// A task is created by an authenticated account on behalf of a target
/// account. The creator's name and email are snapshotted at creation time and
/// never change afterwards; the email is what the ownership guard compares.
///
/// # Status
///
/// ```text
/// PENDING ⇄ IN_PROGRESS ⇄ DONE   (any value may be set at any time)
/// ```
///
/// Status is a label, not a workflow: there is no transition graph.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('PENDING', 'IN_PROGRESS', 'DONE');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status task_status NOT NULL DEFAULT 'PENDING',
///     creator_name VARCHAR(100) NOT NULL,
///     creator_email VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     assigned_account_id UUID REFERENCES accounts(id) ON DELETE SET NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// All statuses, in display order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Done];

    /// Wire/storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown task status: {}", s))
    }
}

/// A persisted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    pub title: String,

    pub description: String,

    pub status: TaskStatus,

    /// Display name of the account that created the task (snapshot)
    pub creator_name: String,

    /// Email of the account that created the task (snapshot, never changes)
    pub creator_email: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// Account the task is for. `None` once that account has been deleted.
    pub assigned_account_id: Option<Uuid>,
}

/// Input for persisting a new task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub creator_name: String,
    pub creator_email: String,
    pub created_at: DateTime<Utc>,
    pub assigned_account_id: Uuid,
}

/// The fields a creator may change on an existing task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    /// Overwrites the mutable fields, leaving identity, creator and timestamp untouched
    pub fn apply(&mut self, changes: TaskChanges) {
        self.title = changes.title;
        self.description = changes.description;
        self.status = changes.status;
    }
}

/// Outward-facing task shape (adds the status label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub status_label: String,
    pub creator_name: String,
    pub creator_email: String,
    pub created_at: DateTime<Utc>,
    pub assigned_account_id: Option<Uuid>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            status_label: task.status.label().to_string(),
            title: task.title,
            description: task.description,
            status: task.status,
            creator_name: task.creator_name,
            creator_email: task.creator_email,
            created_at: task.created_at,
            assigned_account_id: task.assigned_account_id,
        }
    }
}
