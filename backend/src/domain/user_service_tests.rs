//! Behaviour tests for the user service over a mocked repository.

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::validation::DiagnosticCode;

const CLIENT_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
const USER_ID: &str = "123e4567-e89b-12d3-a456-426614174002";

fn stored_user(new_user: &NewUser) -> User {
    User {
        user_id: new_user.user_id,
        client_id: new_user.client_id,
        username: new_user.username.clone(),
        email: new_user.email.clone(),
        password_hash: new_user.password_hash.clone(),
        created_at: new_user.created_at,
        updated_at: new_user.updated_at,
    }
}

fn create_payload() -> CreateUserPayload {
    CreateUserPayload {
        client_id: CLIENT_ID.to_owned(),
        username: "ada_lovelace".to_owned(),
        email: "Ada@Example.COM".to_owned(),
        password_hash: "a9993e364706816aba3e25717850c26c9cd0d89d".to_owned(),
    }
}

#[tokio::test]
async fn create_persists_the_normalized_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_insert()
        .times(1)
        .withf(|new_user| new_user.email == "ada@example.com")
        .returning(|new_user| Ok(stored_user(new_user)));
    let service = UserService::new(Arc::new(repo));

    let user = service
        .create(create_payload())
        .await
        .expect("create should succeed");

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.created_at, user.updated_at);
}

#[tokio::test]
async fn create_rejects_invalid_usernames_before_the_repository() {
    let repo = MockUserRepository::new();
    let service = UserService::new(Arc::new(repo));

    let mut payload = create_payload();
    payload.username = "admin'--".to_owned();
    let error = service
        .create(payload)
        .await
        .expect_err("invalid username must fail");

    match error {
        DomainError::Validation(diagnostic) => {
            assert_eq!(diagnostic.code, DiagnosticCode::InvalidUsername);
        }
        DomainError::NotFound { .. } | DomainError::Database { .. } | DomainError::Api { .. } => {
            panic!("expected a validation error, got {error}")
        }
    }
}

#[tokio::test]
async fn get_by_email_normalizes_the_lookup_key() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .withf(|email| email == "ada@example.com")
        .returning(|_| Ok(None));
    let service = UserService::new(Arc::new(repo));

    let found = service
        .get_by_email("Ada@Example.COM")
        .await
        .expect("lookup should succeed");

    assert!(found.is_none());
}

#[tokio::test]
async fn get_by_username_reports_absence_as_none() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .times(1)
        .withf(|username| username == "ada_lovelace")
        .returning(|_| Ok(None));
    let service = UserService::new(Arc::new(repo));

    let found = service
        .get_by_username("ada_lovelace")
        .await
        .expect("lookup should succeed");

    assert!(found.is_none());
}

#[tokio::test]
async fn update_sends_only_provided_fields() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .times(1)
        .withf(|_, changes| {
            changes.username.as_deref() == Some("new_name")
                && changes.email.is_none()
                && changes.password_hash.is_none()
        })
        .returning(|_, _| Ok(1));
    let service = UserService::new(Arc::new(repo));

    service
        .update(UpdateUserPayload {
            user_id: USER_ID.to_owned(),
            username: Some("new_name".to_owned()),
            email: None,
            password_hash: None,
        })
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn update_zero_count_reclassifies_to_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().times(1).returning(|_, _| Ok(0));
    let service = UserService::new(Arc::new(repo));

    let error = service
        .update(UpdateUserPayload {
            user_id: USER_ID.to_owned(),
            username: Some("new_name".to_owned()),
            email: None,
            password_hash: None,
        })
        .await
        .expect_err("zero affected rows must surface as not-found");

    assert_eq!(
        error,
        DomainError::not_found(ResourceKind::User, format!("userId={USER_ID}")),
    );
}

#[tokio::test]
async fn update_requires_at_least_one_field() {
    let repo = MockUserRepository::new();
    let service = UserService::new(Arc::new(repo));

    let error = service
        .update(UpdateUserPayload {
            user_id: USER_ID.to_owned(),
            username: None,
            email: None,
            password_hash: None,
        })
        .await
        .expect_err("empty update must fail");

    match error {
        DomainError::Validation(diagnostic) => {
            assert_eq!(diagnostic.code, DiagnosticCode::MissingField);
        }
        DomainError::NotFound { .. } | DomainError::Database { .. } | DomainError::Api { .. } => {
            panic!("expected a validation error, got {error}")
        }
    }
}

#[tokio::test]
async fn delete_of_an_absent_user_reports_zero_count() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).returning(|_| Ok(0));
    let service = UserService::new(Arc::new(repo));

    let outcome = service
        .delete(UserKeyPayload {
            user_id: USER_ID.to_owned(),
        })
        .await
        .expect("delete should stay idempotent");

    assert_eq!(outcome.count, 0);
}

#[tokio::test]
async fn list_scopes_to_the_tenant_with_resolved_pagination() {
    let expected_client = Uuid::parse_str(CLIENT_ID).expect("constant uuid");
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .times(1)
        .withf(move |client_id, page| {
            *client_id == expected_client && page.page() == 3 && page.limit() == 25
        })
        .returning(|_, _| Ok(Vec::new()));
    let service = UserService::new(Arc::new(repo));

    service
        .list(ListUsersPayload {
            client_id: CLIENT_ID.to_owned(),
            page: Some("3".to_owned()),
            limit: Some("25".to_owned()),
        })
        .await
        .expect("list should succeed");
}

#[tokio::test]
async fn list_rejects_fractional_page_fields() {
    let repo = MockUserRepository::new();
    let service = UserService::new(Arc::new(repo));

    let error = service
        .list(ListUsersPayload {
            client_id: CLIENT_ID.to_owned(),
            page: Some("1.5".to_owned()),
            limit: None,
        })
        .await
        .expect_err("fractional page must fail");

    match error {
        DomainError::Validation(diagnostic) => {
            assert_eq!(diagnostic.code, DiagnosticCode::InvalidPage);
        }
        DomainError::NotFound { .. } | DomainError::Database { .. } | DomainError::Api { .. } => {
            panic!("expected a validation error, got {error}")
        }
    }
}
