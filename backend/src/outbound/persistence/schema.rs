//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel
//! uses them for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` when migrations
//! change.

diesel::table! {
    /// User accounts table.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle (max 32 characters).
        username -> Varchar,
        /// Human-readable display name (max 64 characters).
        display_name -> Varchar,
        /// Account role stored in its lowercase string form.
        role -> Varchar,
        /// Salted credential digest.
        password_digest -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership validity windows, one row per user.
    memberships (user_id) {
        /// Owning user (primary key and foreign key to `users`).
        user_id -> Uuid,
        /// First day the membership is valid.
        starts_on -> Date,
        /// Last valid day; NULL for open-ended memberships.
        ends_on -> Nullable<Date>,
    }
}

diesel::table! {
    /// Append-only audit trail of account mutations.
    audit_events (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// User the event concerns.
        user_id -> Uuid,
        /// Event name, e.g. `account_registered`.
        action -> Varchar,
        /// Event timestamp.
        recorded_at -> Timestamptz,
    }
}

diesel::joinable!(memberships -> users (user_id));
diesel::joinable!(audit_events -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, memberships, audit_events);
