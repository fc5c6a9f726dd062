//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::error::{DomainResult, ResourceKind};
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User, UserChanges};

use super::models::{NewUserRow, UserChangesetRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::translate::{map_diesel_error, map_pool_error};

/// Diesel-backed implementation of the `UserRepository` port.
///
/// Username and email uniqueness is enforced by database constraints; a
/// violation surfaces as a `Database` error from the translation layer.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row to a domain user.
fn row_to_user(row: UserRow) -> User {
    User {
        user_id: row.user_id,
        client_id: row.client_id,
        username: row.username,
        email: row.email,
        password_hash: row.password_hash,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> DomainResult<User> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            user_id: user.user_id,
            client_id: user.client_id,
            username: &user.username,
            email: &user.email,
            password_hash: &user.password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("userId={}", user.user_id), error)
            })?;

        Ok(row_to_user(row))
    }

    async fn find(&self, user_id: Uuid) -> DomainResult<Option<User>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("userId={user_id}"), error)
            })?;

        Ok(row.map(row_to_user))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("email={email}"), error)
            })?;

        Ok(row.map(row_to_user))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("username={username}"), error)
            })?;

        Ok(row.map(row_to_user))
    }

    async fn update(&self, user_id: Uuid, changes: &UserChanges) -> DomainResult<u64> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserChangesetRow {
            username: changes.username.as_deref(),
            email: changes.email.as_deref(),
            password_hash: changes.password_hash.as_deref(),
            updated_at: changes.updated_at,
        };

        let affected = diesel::update(users::table.filter(users::user_id.eq(user_id)))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("userId={user_id}"), error)
            })?;

        Ok(affected as u64)
    }

    async fn delete(&self, user_id: Uuid) -> DomainResult<u64> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(users::table.filter(users::user_id.eq(user_id)))
            .execute(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("userId={user_id}"), error)
            })?;

        Ok(affected as u64)
    }

    async fn list(&self, client_id: Uuid, page: PageRequest) -> DomainResult<Vec<User>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::client_id.eq(client_id))
            .order((users::created_at.desc(), users::user_id.desc()))
            .offset(page.offset())
            .limit(page.take())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|error| {
                map_diesel_error(ResourceKind::User, &format!("clientId={client_id}"), error)
            })?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn row_to_user_preserves_fields() {
        let now = Utc::now();
        let row = UserRow {
            user_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            username: "ada_lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: "a9993e364706816aba3e25717850c26c9cd0d89d".to_owned(),
            created_at: now,
            updated_at: now,
        };

        let user = row_to_user(row.clone());

        assert_eq!(user.user_id, row.user_id);
        assert_eq!(user.client_id, row.client_id);
        assert_eq!(user.username, row.username);
        assert_eq!(user.email, row.email);
        assert_eq!(user.created_at, row.created_at);
    }
}
