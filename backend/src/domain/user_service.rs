//! User resource operations.
//!
//! Mirrors the task service: validate, stamp, delegate to the
//! [`UserRepository`] port, and re-classify a zero affected-row count on
//! update as `NotFound`. Unique secondary lookups (email, username) are
//! normal lookups — absence is `Ok(None)`. Each operation surfaces at most
//! the first validation diagnostic of its payload.

use std::sync::Arc;

use chrono::Utc;
use pagination::PageDefaults;
use uuid::Uuid;

use crate::domain::MutationCount;
use crate::domain::error::{DomainError, DomainResult, ResourceKind};
use crate::domain::ports::UserRepository;
use crate::domain::user::{
    CreateUserInput, CreateUserPayload, ListUsersPayload, NewUser, UpdateUserInput,
    UpdateUserPayload, User, UserChanges, UserKeyPayload,
};
use crate::domain::validation::rules;

/// User operations over a repository port.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
    page_defaults: PageDefaults,
}

impl<R> UserService<R> {
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

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Validate and persist a new user.
    ///
    /// The email is stored lowercase; `created_at` equals `updated_at` on
    /// the returned record.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected payload, `Database` for a persistence
    /// failure (including username/email uniqueness violations).
    pub async fn create(&self, payload: CreateUserPayload) -> DomainResult<User> {
        let input = CreateUserInput::try_from(payload).map_err(DomainError::from)?;
        let now = Utc::now();
        let user = NewUser {
            user_id: Uuid::new_v4(),
            client_id: input.client_id,
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&user).await
    }

    /// Fetch a user by id; absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected id, `Database` for a persistence failure.
    pub async fn get(&self, payload: UserKeyPayload) -> DomainResult<Option<User>> {
        let user_id = rules::identifier()
            .apply("userId", &payload.user_id)
            .map_err(DomainError::from)?;

        self.repo.find(user_id).await
    }

    /// Fetch a user by its unique email; absence is `Ok(None)`.
    ///
    /// The lookup key is normalized the same way stored emails are, so a
    /// mixed-case query still matches.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed address, `Database` for a persistence
    /// failure.
    pub async fn get_by_email(&self, raw_email: &str) -> DomainResult<Option<User>> {
        let email = rules::email()
            .apply("email", raw_email)
            .map_err(DomainError::from)?;

        self.repo.find_by_email(&email).await
    }

    /// Fetch a user by its unique username; absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed username, `Database` for a persistence
    /// failure.
    pub async fn get_by_username(&self, raw_username: &str) -> DomainResult<Option<User>> {
        let username = rules::username()
            .apply("username", raw_username)
            .map_err(DomainError::from)?;

        self.repo.find_by_username(&username).await
    }

    /// Apply a partial update to the user matching the id.
    ///
    /// At least one updatable field must be provided; only provided fields
    /// change, in a single scoped UPDATE statement. A zero affected-row
    /// count re-classifies as `NotFound`.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound`, or `Database`.
    pub async fn update(&self, payload: UpdateUserPayload) -> DomainResult<()> {
        let input = UpdateUserInput::try_from(payload).map_err(DomainError::from)?;
        let changes = UserChanges {
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            updated_at: Utc::now(),
        };

        let affected = self.repo.update(input.user_id, &changes).await?;
        if affected == 0 {
            return Err(DomainError::not_found(
                ResourceKind::User,
                format!("userId={}", input.user_id),
            ));
        }
        Ok(())
    }

    /// Delete the user matching the id.
    ///
    /// Idempotent-observable: deleting an absent record yields `count == 0`,
    /// never an error.
    ///
    /// # Errors
    ///
    /// `Validation` for a rejected id, `Database` for a persistence failure.
    pub async fn delete(&self, payload: UserKeyPayload) -> DomainResult<MutationCount> {
        let user_id = rules::identifier()
            .apply("userId", &payload.user_id)
            .map_err(DomainError::from)?;

        let count = self.repo.delete(user_id).await?;
        Ok(MutationCount { count })
    }

    /// List a tenant's users, newest first.
    ///
    /// # Errors
    ///
    /// `Validation` for rejected fields, `Database` for a persistence
    /// failure.
    pub async fn list(&self, payload: ListUsersPayload) -> DomainResult<Vec<User>> {
        let client_id = rules::identifier()
            .apply("clientId", &payload.client_id)
            .map_err(DomainError::from)?;
        let page = rules::resolve_page(
            payload.page.as_deref(),
            payload.limit.as_deref(),
            self.page_defaults,
        )
        .map_err(DomainError::from)?;

        self.repo.list(client_id, page).await
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
