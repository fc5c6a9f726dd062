//! Tests for the error taxonomy formatting and dispatch.

use rstest::rstest;

use super::*;
use crate::domain::validation::DiagnosticCode;

fn validation_error() -> DomainError {
    DomainError::from(Diagnostic::field(
        DiagnosticCode::TooLong,
        "content",
        "must not exceed 1000 characters",
    ))
}

#[rstest]
fn not_found_names_resource_and_key() {
    let error = DomainError::not_found(ResourceKind::Task, "userId=a, taskId=b");

    assert_eq!(error.to_string(), "task not found: userId=a, taskId=b");
}

#[rstest]
fn validation_display_carries_the_diagnostic() {
    let error = validation_error();

    assert!(error.to_string().contains("content"));
    assert!(error.to_string().contains("too_long"));
}

#[rstest]
fn database_display_carries_the_cause() {
    let error = DomainError::database("connection reset");

    assert_eq!(
        error.to_string(),
        "database operation failed: connection reset"
    );
}

#[rstest]
fn every_variant_maps_to_its_kind() {
    // One arm per variant; a new variant must be added here to compile.
    let cases = [
        (
            DomainError::not_found(ResourceKind::User, "userId=x"),
            ErrorKind::NotFound,
        ),
        (validation_error(), ErrorKind::Validation),
        (DomainError::database("boom"), ErrorKind::Database),
        (DomainError::api("upstream 502"), ErrorKind::Api),
    ];

    for (error, expected) in cases {
        assert_eq!(error.kind(), expected);
    }
}

#[rstest]
fn serializes_with_kind_tag() {
    let json = serde_json::to_value(DomainError::database("boom"))
        .expect("error should serialize");

    assert_eq!(json["kind"], "database");
    assert_eq!(json["cause"], "boom");
}

#[rstest]
fn diagnostics_convert_into_validation_errors() {
    let error = validation_error();

    match error {
        DomainError::Validation(diagnostic) => {
            assert_eq!(diagnostic.code, DiagnosticCode::TooLong);
            assert_eq!(diagnostic.field.as_deref(), Some("content"));
        }
        DomainError::NotFound { .. } | DomainError::Database { .. } | DomainError::Api { .. } => {
            panic!("diagnostic must convert to the validation kind")
        }
    }
}
