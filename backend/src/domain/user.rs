//! User aggregate and its operation inputs.
//!
//! Users carry a unique `user_id` plus a `client_id` tenant scope used by
//! list queries. Username and email are unique secondary lookup keys. As with
//! tasks, payload structs hold raw boundary values and `TryFrom` conversions
//! produce validated inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{Diagnostic, rules};

/// Largest accepted password hash length.
pub const PASSWORD_HASH_MAX: usize = 255;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identity.
    pub user_id: Uuid,
    /// Tenant the user belongs to.
    pub client_id: Uuid,
    /// Unique username.
    pub username: String,
    /// Unique, lowercase email address.
    pub email: String,
    /// Opaque password hash; never a plaintext password.
    pub password_hash: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A validated user ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Server-assigned user identity.
    pub user_id: Uuid,
    /// Tenant the user belongs to.
    pub client_id: Uuid,
    /// Normalized username.
    pub username: String,
    /// Normalized email address.
    pub email: String,
    /// Opaque password hash.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp; equals `created_at` at creation.
    pub updated_at: DateTime<Utc>,
}

/// Validated field changes for a partial user update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement username, when provided.
    pub username: Option<String>,
    /// Replacement email, when provided.
    pub email: Option<String>,
    /// Replacement password hash, when provided.
    pub password_hash: Option<String>,
    /// Stamped modification time.
    pub updated_at: DateTime<Utc>,
}

/// Raw create-user fields as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    /// Tenant id.
    pub client_id: String,
    /// Requested username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Validated create-user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Tenant the user belongs to.
    pub client_id: Uuid,
    /// Normalized username.
    pub username: String,
    /// Normalized email address.
    pub email: String,
    /// Opaque password hash.
    pub password_hash: String,
}

impl TryFrom<CreateUserPayload> for CreateUserInput {
    type Error = Diagnostic;

    fn try_from(payload: CreateUserPayload) -> Result<Self, Self::Error> {
        let client_id = rules::identifier().apply("clientId", &payload.client_id)?;
        let username = rules::username().apply("username", &payload.username)?;
        let email = rules::email().apply("email", &payload.email)?;
        let password_hash = rules::bounded_safe_string(1, PASSWORD_HASH_MAX)
            .apply("passwordHash", &payload.password_hash)?;

        Ok(Self {
            client_id,
            username,
            email,
            password_hash,
        })
    }
}

/// Raw unique user key as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKeyPayload {
    /// User id.
    pub user_id: String,
}

/// Raw partial-update fields as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    /// User id.
    pub user_id: String,
    /// Replacement username, when provided.
    pub username: Option<String>,
    /// Replacement email, when provided.
    pub email: Option<String>,
    /// Replacement password hash, when provided.
    pub password_hash: Option<String>,
}

/// Validated partial-update input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// Identity of the user to update.
    pub user_id: Uuid,
    /// Replacement username, when provided.
    pub username: Option<String>,
    /// Replacement email, when provided.
    pub email: Option<String>,
    /// Replacement password hash, when provided.
    pub password_hash: Option<String>,
}

impl TryFrom<UpdateUserPayload> for UpdateUserInput {
    type Error = Diagnostic;

    fn try_from(payload: UpdateUserPayload) -> Result<Self, Self::Error> {
        rules::at_least_one_present(&[
            ("username", payload.username.is_some()),
            ("email", payload.email.is_some()),
            ("passwordHash", payload.password_hash.is_some()),
        ])?;

        let user_id = rules::identifier().apply("userId", &payload.user_id)?;
        let username = payload
            .username
            .as_deref()
            .map(|raw| rules::username().apply("username", raw))
            .transpose()?;
        let email = payload
            .email
            .as_deref()
            .map(|raw| rules::email().apply("email", raw))
            .transpose()?;
        let password_hash = payload
            .password_hash
            .as_deref()
            .map(|raw| {
                rules::bounded_safe_string(1, PASSWORD_HASH_MAX).apply("passwordHash", raw)
            })
            .transpose()?;

        Ok(Self {
            user_id,
            username,
            email,
            password_hash,
        })
    }
}

/// Raw list-users fields as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersPayload {
    /// Tenant id to list within.
    pub client_id: String,
    /// Optional page field.
    pub page: Option<String>,
    /// Optional limit field.
    pub limit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::DiagnosticCode;
    use rstest::rstest;

    const CLIENT_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
    const USER_ID: &str = "123e4567-e89b-12d3-a456-426614174002";

    fn create_payload() -> CreateUserPayload {
        CreateUserPayload {
            client_id: CLIENT_ID.to_owned(),
            username: "ada_lovelace".to_owned(),
            email: "Ada@Example.COM".to_owned(),
            password_hash: "a9993e364706816aba3e25717850c26c9cd0d89d".to_owned(),
        }
    }

    #[rstest]
    fn create_input_normalizes_email() {
        let input = CreateUserInput::try_from(create_payload())
            .expect("valid payload should convert");

        assert_eq!(input.email, "ada@example.com");
        assert_eq!(input.username, "ada_lovelace");
    }

    #[rstest]
    #[case::embedded_space("ada lovelace")]
    #[case::injection_payload("admin'--")]
    fn create_input_rejects_invalid_usernames(#[case] username: &str) {
        let mut payload = create_payload();
        payload.username = username.to_owned();

        let diagnostic =
            CreateUserInput::try_from(payload).expect_err("invalid username must fail");

        assert_eq!(diagnostic.code, DiagnosticCode::InvalidUsername);
    }

    #[rstest]
    fn create_input_surfaces_the_first_diagnostic_only() {
        // Both username and email are invalid; field order decides which
        // diagnostic is reported.
        let mut payload = create_payload();
        payload.username = "ab".to_owned();
        payload.email = "not-an-email".to_owned();

        let diagnostic = CreateUserInput::try_from(payload).expect_err("must fail");

        assert_eq!(diagnostic.field.as_deref(), Some("username"));
        assert_eq!(diagnostic.code, DiagnosticCode::TooShort);
    }

    #[rstest]
    fn update_input_requires_at_least_one_field() {
        let diagnostic = UpdateUserInput::try_from(UpdateUserPayload {
            user_id: USER_ID.to_owned(),
            username: None,
            email: None,
            password_hash: None,
        })
        .expect_err("empty update must fail");

        assert_eq!(diagnostic.code, DiagnosticCode::MissingField);
        assert!(diagnostic.message.contains("username, email, passwordHash"));
    }

    #[rstest]
    fn update_input_keeps_absent_fields_absent() {
        let input = UpdateUserInput::try_from(UpdateUserPayload {
            user_id: USER_ID.to_owned(),
            username: Some("new_name".to_owned()),
            email: None,
            password_hash: None,
        })
        .expect("valid payload should convert");

        assert_eq!(input.username.as_deref(), Some("new_name"));
        assert!(input.email.is_none());
        assert!(input.password_hash.is_none());
    }
}
