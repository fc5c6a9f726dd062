//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Tasks, keyed by the ownership-scoped compound identity.
    tasks (user_id, task_id) {
        /// Owning user; first half of the compound primary key.
        user_id -> Uuid,
        /// Task identity; second half of the compound primary key.
        task_id -> Uuid,
        /// Free-text content (max 1000 characters, enforced by validation).
        content -> Varchar,
        /// Declared status token.
        status -> Varchar,
        /// Completion timestamp, when recorded.
        completed_at -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts, unique by id, username, and email.
    users (user_id) {
        /// Primary key: UUID v4 identifier.
        user_id -> Uuid,
        /// Tenant the account belongs to.
        client_id -> Uuid,
        /// Unique username (max 100 characters).
        username -> Varchar,
        /// Unique, lowercase email address (max 255 characters).
        email -> Varchar,
        /// Opaque password hash.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
