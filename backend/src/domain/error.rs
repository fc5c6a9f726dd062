//! Domain-level error taxonomy.
//!
//! Every fallible operation in the crate returns exactly one of the four
//! [`DomainError`] kinds or succeeds; nothing is raised across a layer
//! boundary. The enum is deliberately closed — no `#[non_exhaustive]` — so
//! adding a fifth kind breaks every dispatch site at compile time instead of
//! falling through to a generic failure path. Transport adapters map each
//! kind to a protocol-specific envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::Diagnostic;

/// Kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A task scoped to its owning user.
    Task,
    /// A user scoped to its tenant.
    User,
}

impl ResourceKind {
    /// Wire representation of the resource kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a [`DomainError`], for dispatch at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The referenced entity does not exist under the given key scope.
    NotFound,
    /// Input failed a validation rule.
    Validation,
    /// Unexpected persistence failure.
    Database,
    /// Failure surfaced from a downstream service call.
    Api,
}

/// Closed error taxonomy returned by every fallible operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DomainError {
    /// The referenced entity does not exist under the given key scope.
    #[error("{resource} not found: {key}")]
    NotFound {
        /// Kind of entity that was expected to exist.
        resource: ResourceKind,
        /// Key scope the lookup or mutation was addressed to.
        key: String,
    },
    /// Input failed a validation rule. Never produced by the persistence
    /// layer; validation always runs before a backend call.
    #[error("validation failed: {0}")]
    Validation(Diagnostic),
    /// Unexpected persistence failure: constraint violation other than
    /// not-found, connectivity failure, or timeout.
    #[error("database operation failed: {cause}")]
    Database {
        /// Classified description of the underlying failure.
        cause: String,
    },
    /// Failure surfaced from a downstream service call. No current caller
    /// constructs this; the variant stays so future callers are forced to
    /// handle it.
    #[error("api operation failed: {cause}")]
    Api {
        /// Description of the downstream failure.
        cause: String,
    },
}

impl DomainError {
    /// Convenience constructor for [`DomainError::NotFound`].
    pub fn not_found(resource: ResourceKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            key: key.into(),
        }
    }

    /// Convenience constructor for [`DomainError::Database`].
    pub fn database(cause: impl Into<String>) -> Self {
        Self::Database {
            cause: cause.into(),
        }
    }

    /// Convenience constructor for [`DomainError::Api`].
    pub fn api(cause: impl Into<String>) -> Self {
        Self::Api {
            cause: cause.into(),
        }
    }

    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Database { .. } => ErrorKind::Database,
            Self::Api { .. } => ErrorKind::Api,
        }
    }
}

impl From<Diagnostic> for DomainError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::Validation(diagnostic)
    }
}

/// Convenient result alias for fallible domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
