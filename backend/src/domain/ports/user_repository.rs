//! Port for user persistence.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::user::{NewUser, User, UserChanges};

/// Port for user storage and retrieval.
///
/// `user_id` is the unique primary key; `username` and `email` are unique
/// secondary lookup keys; `client_id` scopes list queries to a tenant. As
/// with tasks, mutations return affected-row counts and lookups report
/// absence as `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return the stored record.
    async fn insert(&self, user: &NewUser) -> DomainResult<User>;

    /// Fetch a user by id.
    async fn find(&self, user_id: Uuid) -> DomainResult<Option<User>>;

    /// Fetch a user by its unique email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Fetch a user by its unique username.
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Apply a changeset to the user matching the id in a single scoped
    /// UPDATE statement; returns the number of rows affected.
    async fn update(&self, user_id: Uuid, changes: &UserChanges) -> DomainResult<u64>;

    /// Delete the user matching the id; returns the number of rows affected.
    async fn delete(&self, user_id: Uuid) -> DomainResult<u64>;

    /// List a tenant's users, newest first, for the resolved page.
    async fn list(&self, client_id: Uuid, page: PageRequest) -> DomainResult<Vec<User>>;
}
