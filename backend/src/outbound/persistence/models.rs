//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Read rows select only the columns the domain needs.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{audit_events, memberships, users};

/// Row struct for reading account fields from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub password_digest: &'a str,
}

/// Insertable struct for creating membership records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = memberships)]
pub(crate) struct NewMembershipRow {
    pub user_id: Uuid,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
}

/// Insertable struct for appending audit trail entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub(crate) struct NewAuditEventRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: &'a str,
}
