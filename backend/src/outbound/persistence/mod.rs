//! PostgreSQL persistence adapters.
//!
//! [`pool`] owns the async connection pool, [`schema`] and [`models`] the
//! Diesel table and row definitions, and [`translate`] the single adapter
//! that classifies backend failures into the domain error taxonomy. The
//! repository modules implement the domain ports on top of these pieces.

pub mod pool;
pub(crate) mod schema;
pub(crate) mod translate;

mod diesel_task_repository;
mod diesel_user_repository;
mod models;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
