//! Repository ports for the hexagonal boundary.
//!
//! Ports are async traits implemented by the persistence adapters in
//! `outbound`. Every method returns a [`crate::domain::error::DomainError`]
//! on failure — adapters own the translation from backend-specific failures,
//! so no foreign error type crosses this boundary.

mod task_repository;
mod user_repository;

#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::TaskRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
