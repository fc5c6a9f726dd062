//! The single adapter between backend failure signals and the domain
//! taxonomy.
//!
//! Every backend-specific field name and error variant is inspected here and
//! nowhere else. A Diesel `NotFound` — the engine's "no record matched the
//! selector" signal — classifies as `NotFound` with the caller's resource and
//! key context; it can only arise from single-record selector operations.
//! Ownership-scoped update/delete statements return affected-row counts
//! instead and never raise it; interpreting a zero count belongs to the
//! service layer. Everything else, pool failures included, classifies as
//! `Database`.

use tracing::debug;

use crate::domain::error::{DomainError, ResourceKind};

use super::pool::PoolError;

/// Classify a pool failure.
pub(crate) fn map_pool_error(error: PoolError) -> DomainError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    DomainError::database(format!("connection pool failure: {message}"))
}

/// Classify a Diesel failure for an operation addressed to `resource`/`key`.
pub(crate) fn map_diesel_error(
    resource: ResourceKind,
    key: &str,
    error: diesel::result::Error,
) -> DomainError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DomainError::not_found(resource, key),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DomainError::database(format!("unique constraint violated: {}", info.message()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DomainError::database(format!("database connection error: {}", info.message()))
        }
        DieselError::DatabaseError(_, info) => {
            DomainError::database(format!("database error: {}", info.message()))
        }
        _ => DomainError::database("database error"),
    }
}
