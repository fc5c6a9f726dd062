//! Port for task persistence.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::task::{NewTask, Task, TaskChanges};

/// Port for task storage and retrieval.
///
/// Mutations are scoped by the `(user_id, task_id)` ownership key. `update`
/// and `delete` return the affected-row count rather than raising a
/// not-found failure; interpreting a zero count belongs to the service
/// layer. Lookups report absence as `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task and return the stored record.
    async fn insert(&self, task: &NewTask) -> DomainResult<Task>;

    /// Fetch a task by its ownership-scoped key.
    async fn find(&self, user_id: Uuid, task_id: Uuid) -> DomainResult<Option<Task>>;

    /// Apply a changeset to the task matching the key in a single scoped
    /// UPDATE statement; returns the number of rows affected.
    async fn update(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        changes: &TaskChanges,
    ) -> DomainResult<u64>;

    /// Delete the task matching the key; returns the number of rows affected.
    async fn delete(&self, user_id: Uuid, task_id: Uuid) -> DomainResult<u64>;

    /// List the owner's tasks, newest first, for the resolved page.
    async fn list(&self, user_id: Uuid, page: PageRequest) -> DomainResult<Vec<Task>>;
}
