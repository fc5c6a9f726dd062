//! Task resource operations.
//!
//! The service validates raw payloads, stamps server-assigned timestamps,
//! and drives the [`TaskRepository`] port. Validation failures never reach
//! the repository; repository failures arrive already classified as
//! [`DomainError`] values. Each operation surfaces at most the first
//! validation diagnostic of its payload.

use std::sync::Arc;

use chrono::Utc;
use pagination::PageDefaults;
use uuid::Uuid;

use crate::domain::MutationCount;
use crate::domain::error::{DomainError, DomainResult, ResourceKind};
use crate::domain::ports::TaskRepository;
use crate::domain::task::{
    CreateTaskInput, CreateTaskPayload, ListTasksPayload, NewTask, Task, TaskChanges, TaskKey,
    TaskKeyPayload, UpdateTaskInput, UpdateTaskPayload,
};
use crate::domain::validation::rules;

fn task_key_description(user_id: Uuid, task_id: Uuid) -> String {
    format!("userId={user_id}, taskId={task_id}")
}

/// Task operations over a repository port.
#[derive(Clone)]
pub struct TaskService<R> {
    repo: Arc<R>,
    page_defaults: PageDefaults,
}

impl<R> TaskService<R> {
    /// Create a service with the default pagination values.
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_page_defaults(repo, PageDefaults::default())
    }

    /// Create a service with explicit pagination defaults.
    pub fn with_page_defaults(repo: Arc<R>, page_defaults: PageDefaults) -> Self {
        Self {
            repo,
            page_defaults,
        }
    }
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Validate and persist a new task.
    ///
    /// `created_at` and `updated_at` are stamped from a single clock reading
    /// and are therefore equal on the returned record.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected payload, `Database` for a persistence
    /// failure.
    pub async fn create(&self, payload: CreateTaskPayload) -> DomainResult<Task> {
        let input = CreateTaskInput::try_from(payload).map_err(DomainError::from)?;
        let now = Utc::now();
        let task = NewTask {
            user_id: input.user_id,
            task_id: Uuid::new_v4(),
            content: input.content,
            status: input.status,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&task).await
    }

    /// Fetch a task by its ownership-scoped key.
    ///
    /// Absence of a row is a normal lookup outcome and is reported as
    /// `Ok(None)`, not as `NotFound`.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected key, `Database` for a persistence failure.
    pub async fn get(&self, payload: TaskKeyPayload) -> DomainResult<Option<Task>> {
        let key = TaskKey::try_from(payload).map_err(DomainError::from)?;

        self.repo.find(key.user_id, key.task_id).await
    }

    /// Apply a partial update to the task matching the key.
    ///
    /// At least one updatable field must be provided. Only provided fields
    /// change; the merge happens in a single scoped UPDATE statement. A zero
    /// affected-row count means the key matched nothing and is re-classified
    /// as `NotFound`.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound`, or `Database`.
    pub async fn update(&self, payload: UpdateTaskPayload) -> DomainResult<()> {
        let input = UpdateTaskInput::try_from(payload).map_err(DomainError::from)?;
        let changes = TaskChanges {
            content: input.content,
            status: input.status,
            completed_at: input.completed_at,
            updated_at: Utc::now(),
        };

        let affected = self
            .repo
            .update(input.key.user_id, input.key.task_id, &changes)
            .await?;
        if affected == 0 {
            return Err(DomainError::not_found(
                ResourceKind::Task,
                task_key_description(input.key.user_id, input.key.task_id),
            ));
        }
        Ok(())
    }

    /// Delete the task matching the key.
    ///
    /// Deletion is idempotent-observable: deleting an absent record yields
    /// `count == 0`, never an error.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected key, `Database` for a persistence failure.
    pub async fn delete(&self, payload: TaskKeyPayload) -> DomainResult<MutationCount> {
        let key = TaskKey::try_from(payload).map_err(DomainError::from)?;

        let count = self.repo.delete(key.user_id, key.task_id).await?;
        Ok(MutationCount { count })
    }

    /// List the owner's tasks, newest first.
    ///
    /// Pagination fields resolve against the service's explicit defaults
    /// before the repository is consulted.
    ///
    /// # Errors
    ///
    /// `Validation` for rejected fields, `Database` for a persistence
    /// failure.
    pub async fn list(&self, payload: ListTasksPayload) -> DomainResult<Vec<Task>> {
        let user_id = rules::identifier()
            .apply("userId", &payload.user_id)
            .map_err(DomainError::from)?;
        let page = rules::resolve_page(
            payload.page.as_deref(),
            payload.limit.as_deref(),
            self.page_defaults,
        )
        .map_err(DomainError::from)?;

        self.repo.list(user_id, page).await
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
