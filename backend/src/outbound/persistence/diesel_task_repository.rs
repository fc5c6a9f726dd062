//! PostgreSQL-backed `TaskRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::error::{DomainResult, ResourceKind};
use crate::domain::ports::TaskRepository;
use crate::domain::task::{NewTask, Task, TaskChanges, TaskStatus};

use super::models::{NewTaskRow, TaskChangesetRow, TaskRow};
use super::pool::DbPool;
use super::schema::tasks;
use super::translate::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the `TaskRepository` port.
///
/// Mutations address rows through the `(user_id, task_id)` ownership filter
/// and report affected-row counts; lookups use `optional()` so absence is a
/// value, not an error.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn task_key(user_id: Uuid, task_id: Uuid) -> String {
    format!("userId={user_id}, taskId={task_id}")
}

/// Convert a database row to a domain task.
fn row_to_task(row: TaskRow) -> Task {
    let status = TaskStatus::parse(&row.status).unwrap_or_else(|| {
        tracing::warn!(
            value = row.status,
            task_id = %row.task_id,
            "unrecognised status value, defaulting to Pending"
        );
        TaskStatus::Pending
    });

    Task {
        user_id: row.user_id,
        task_id: row.task_id,
        content: row.content,
        status,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &NewTask) -> DomainResult<Task> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTaskRow {
            user_id: task.user_id,
            task_id: task.task_id,
            content: &task.content,
            status: task.status.as_str(),
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
        };

        let row: TaskRow = diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(
                    ResourceKind::Task,
                    &task_key(task.user_id, task.task_id),
                    error,
                )
            })?;

        Ok(row_to_task(row))
    }

    async fn find(&self, user_id: Uuid, task_id: Uuid) -> DomainResult<Option<Task>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TaskRow> = tasks::table
            .filter(tasks::user_id.eq(user_id))
            .filter(tasks::task_id.eq(task_id))
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                map_diesel_error(ResourceKind::Task, &task_key(user_id, task_id), error)
            })?;

        Ok(row.map(row_to_task))
    }

    async fn update(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        changes: &TaskChanges,
    ) -> DomainResult<u64> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = TaskChangesetRow {
            content: changes.content.as_deref(),
            status: changes.status.map(TaskStatus::as_str),
            completed_at: changes.completed_at,
            updated_at: changes.updated_at,
        };

        let affected = diesel::update(
            tasks::table
                .filter(tasks::user_id.eq(user_id))
                .filter(tasks::task_id.eq(task_id)),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(|error| {
            map_diesel_error(ResourceKind::Task, &task_key(user_id, task_id), error)
        })?;

        Ok(affected as u64)
    }

    async fn delete(&self, user_id: Uuid, task_id: Uuid) -> DomainResult<u64> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            tasks::table
                .filter(tasks::user_id.eq(user_id))
                .filter(tasks::task_id.eq(task_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(|error| {
            map_diesel_error(ResourceKind::Task, &task_key(user_id, task_id), error)
        })?;

        Ok(affected as u64)
    }

    async fn list(&self, user_id: Uuid, page: PageRequest) -> DomainResult<Vec<Task>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::user_id.eq(user_id))
            .order((tasks::created_at.desc(), tasks::task_id.desc()))
            .offset(page.offset())
            .limit(page.take())
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(ResourceKind::Task, &format!("userId={user_id}"), error)
            })?;

        Ok(rows.into_iter().map(row_to_task).collect())
    }
}
