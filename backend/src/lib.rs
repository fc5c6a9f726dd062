//! Core library for the task/user administration backend.
//!
//! The crate is split along the hexagonal boundary: [`domain`] owns the
//! entities, validation rules, error taxonomy, and resource services behind
//! repository ports; [`outbound`] provides the PostgreSQL adapters that
//! implement those ports.

pub mod domain;
pub mod outbound;

pub use pagination;
