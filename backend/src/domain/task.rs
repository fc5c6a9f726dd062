//! Task aggregate and its operation inputs.
//!
//! A task is owned by a user; every operation addresses it through the
//! `(user_id, task_id)` compound key, which both locates and authorises the
//! record in one step. Payload structs carry the raw field values exactly as
//! received at the transport boundary; `TryFrom` conversions validate and
//! normalize them into typed inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{Diagnostic, DiagnosticCode, rules};

/// Largest accepted task content length.
pub const TASK_CONTENT_MAX: usize = 1000;

/// Declared task states.
///
/// The set is declared only; no transition rules are enforced — a status
/// change is a plain field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, not yet started.
    Pending,
    /// Work has started.
    InProgress,
    /// Work has finished.
    Completed,
}

impl TaskStatus {
    /// Parse a wire token; `None` for unrecognised input.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

fn parse_status_field(field: &str, raw: &str) -> Result<TaskStatus, Diagnostic> {
    TaskStatus::parse(raw).ok_or_else(|| {
        Diagnostic::field(
            DiagnosticCode::InvalidStatus,
            field,
            "must be one of: PENDING, IN_PROGRESS, COMPLETED",
        )
    })
}

/// A stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Owning user.
    pub user_id: Uuid,
    /// Task identity within the owner's scope.
    pub task_id: Uuid,
    /// Free-text content.
    pub content: String,
    /// Declared state.
    pub status: TaskStatus,
    /// Completion timestamp, when one has been recorded.
    pub completed_at: Option<DateTime<Utc>>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A validated task ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning user.
    pub user_id: Uuid,
    /// Server-assigned task identity.
    pub task_id: Uuid,
    /// Normalized content.
    pub content: String,
    /// Initial state.
    pub status: TaskStatus,
    /// Completion timestamp; unset at creation.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp; equals `created_at` at creation.
    pub updated_at: DateTime<Utc>,
}

/// Validated field changes for a partial task update.
///
/// `None` fields are left unchanged by the persistence layer; the whole
/// changeset is applied in a single scoped UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement content, when provided.
    pub content: Option<String>,
    /// Replacement status, when provided.
    pub status: Option<TaskStatus>,
    /// Replacement completion timestamp, when provided.
    pub completed_at: Option<DateTime<Utc>>,
    /// Stamped modification time.
    pub updated_at: DateTime<Utc>,
}

/// Raw create-task fields as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    /// Owning user id.
    pub user_id: String,
    /// Task content.
    pub content: String,
    /// Optional initial status token; defaults to `PENDING`.
    pub status: Option<String>,
}

/// Validated create-task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Normalized content.
    pub content: String,
    /// Initial status.
    pub status: TaskStatus,
}

impl TryFrom<CreateTaskPayload> for CreateTaskInput {
    type Error = Diagnostic;

    fn try_from(payload: CreateTaskPayload) -> Result<Self, Self::Error> {
        let user_id = rules::identifier().apply("userId", &payload.user_id)?;
        let content = rules::free_text_content(TASK_CONTENT_MAX).apply("content", &payload.content)?;
        let status = match payload.status.as_deref() {
            None => TaskStatus::Pending,
            Some(raw) => parse_status_field("status", raw)?,
        };

        Ok(Self {
            user_id,
            content,
            status,
        })
    }
}

/// Raw ownership-scoped task key as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskKeyPayload {
    /// Owning user id.
    pub user_id: String,
    /// Task id.
    pub task_id: String,
}

/// Validated ownership-scoped task key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskKey {
    /// Owning user.
    pub user_id: Uuid,
    /// Task identity within the owner's scope.
    pub task_id: Uuid,
}

impl TryFrom<TaskKeyPayload> for TaskKey {
    type Error = Diagnostic;

    fn try_from(payload: TaskKeyPayload) -> Result<Self, Self::Error> {
        let user_id = rules::identifier().apply("userId", &payload.user_id)?;
        let task_id = rules::identifier().apply("taskId", &payload.task_id)?;

        Ok(Self { user_id, task_id })
    }
}

/// Raw partial-update fields as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    /// Owning user id.
    pub user_id: String,
    /// Task id.
    pub task_id: String,
    /// Replacement content, when provided.
    pub content: Option<String>,
    /// Replacement status token, when provided.
    pub status: Option<String>,
    /// Replacement completion timestamp, when provided.
    pub completed_at: Option<String>,
}

/// Validated partial-update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskInput {
    /// Ownership-scoped key of the task to update.
    pub key: TaskKey,
    /// Replacement content, when provided.
    pub content: Option<String>,
    /// Replacement status, when provided.
    pub status: Option<TaskStatus>,
    /// Replacement completion timestamp, when provided.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<UpdateTaskPayload> for UpdateTaskInput {
    type Error = Diagnostic;

    fn try_from(payload: UpdateTaskPayload) -> Result<Self, Self::Error> {
        rules::at_least_one_present(&[
            ("content", payload.content.is_some()),
            ("status", payload.status.is_some()),
            ("completedAt", payload.completed_at.is_some()),
        ])?;

        let user_id = rules::identifier().apply("userId", &payload.user_id)?;
        let task_id = rules::identifier().apply("taskId", &payload.task_id)?;
        let content = payload
            .content
            .as_deref()
            .map(|raw| rules::free_text_content(TASK_CONTENT_MAX).apply("content", raw))
            .transpose()?;
        let status = payload
            .status
            .as_deref()
            .map(|raw| parse_status_field("status", raw))
            .transpose()?;
        let completed_at = payload
            .completed_at
            .as_deref()
            .map(|raw| rules::iso_timestamp().apply("completedAt", raw))
            .transpose()?;

        Ok(Self {
            key: TaskKey { user_id, task_id },
            content,
            status,
            completed_at,
        })
    }
}

/// Raw list-tasks fields as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksPayload {
    /// Owning user id.
    pub user_id: String,
    /// Optional page field.
    pub page: Option<String>,
    /// Optional limit field.
    pub limit: Option<String>,
}
