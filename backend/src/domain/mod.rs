//! Domain entities, validation, ports, and resource services.
//!
//! Data flows one way: raw boundary payloads are validated and normalized by
//! [`validation`], the services in [`task_service`] and [`user_service`]
//! drive the repository [`ports`], and every failure surfaces as a
//! [`error::DomainError`]. Values that leave the validation layer are
//! trusted; nothing downstream re-scans them.

pub mod error;
pub mod ports;
pub mod task;
pub mod task_service;
pub mod user;
pub mod user_service;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use self::error::{DomainError, DomainResult, ErrorKind, ResourceKind};
pub use self::task::{Task, TaskStatus};
pub use self::task_service::TaskService;
pub use self::user::User;
pub use self::user_service::UserService;

/// Result shape for scoped bulk mutations.
///
/// Carries the affected-row count; a zero count after a delete is a normal,
/// idempotent outcome rather than a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationCount {
    /// Number of rows the statement affected.
    pub count: u64,
}
