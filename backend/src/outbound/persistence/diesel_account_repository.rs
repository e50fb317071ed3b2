//! PostgreSQL-backed account repository.
//!
//! `register` is the transactional path: the user row, the initial
//! membership, and the audit trail entry are written as composed steps
//! under one transaction, so a failure in any of them leaves no partial
//! account behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use scoped_futures::ScopedFutureExt;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::AccountRepository;
use crate::domain::registration::{NewAccount, RegisteredAccount};
use crate::domain::{
    DisplayName, Error, Membership, Outcome, PasswordDigest, TransactionComposer, User, UserId,
    UserRole, Username,
};

use super::models::{NewAuditEventRow, NewMembershipRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{audit_events, memberships, users};
use super::session::DieselSession;

/// Audit action recorded for a completed registration.
const ACCOUNT_REGISTERED: &str = "account_registered";

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use backend::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/app")).await?;
    /// let repository = DieselAccountRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain errors.
fn map_pool_error(error: PoolError) -> Error {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            Error::service_unavailable(message)
        }
    }
}

/// Map Diesel errors to domain errors, preserving driver diagnostics.
fn map_diesel_error(error: diesel::result::Error) -> Error {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error_message, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => Error::not_found("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Error::conflict("username is already registered")
                .with_details(json!({ "constraint": info.constraint_name() }))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            Error::service_unavailable(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => Error::internal(info.message().to_owned()),
        _ => Error::internal(error_message),
    }
}

/// Rehydrate a domain user from its row, rejecting corrupt stored values.
fn row_to_user(row: UserRow) -> Result<User, Error> {
    let role = row
        .role
        .parse::<UserRole>()
        .map_err(|err| Error::internal(format!("corrupt account row: {err}")))?;
    let username = Username::new(row.username)
        .map_err(|err| Error::internal(format!("corrupt account row: {err}")))?;
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| Error::internal(format!("corrupt account row: {err}")))?;

    Ok(User::new(UserId::from(row.id), username, display_name, role))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn register(&self, account: &NewAccount) -> Outcome<RegisteredAccount> {
        let conn = match self.pool.get_owned().await {
            Ok(conn) => conn,
            Err(error) => return map_pool_error(error).into(),
        };

        let mut composer = match TransactionComposer::begin(DieselSession::new(conn)).await {
            Outcome::Success(composer) => composer,
            Outcome::Failure(error) => return error.into(),
        };

        let user = account.user().clone();
        let period = *account.period();
        let digest = PasswordDigest::derive(account.password());
        let username = user.username().as_ref().to_owned();
        let display_name = user.display_name().as_ref().to_owned();
        let role = user.role();

        composer.add_step(move |session, account_id| {
            async move {
                let row = NewUserRow {
                    id: account_id,
                    username: &username,
                    display_name: &display_name,
                    role: role.as_str(),
                    password_digest: digest.as_str(),
                };
                match diesel::insert_into(users::table)
                    .values(&row)
                    .execute(session.connection())
                    .await
                {
                    Ok(_) => Outcome::Success(account_id),
                    Err(error) => Outcome::Failure(map_diesel_error(error)),
                }
            }
            .scope_boxed()
        });

        composer.add_step(move |session, account_id| {
            async move {
                let row = NewMembershipRow {
                    user_id: account_id,
                    starts_on: period.starts_on(),
                    ends_on: period.ends_on(),
                };
                match diesel::insert_into(memberships::table)
                    .values(&row)
                    .execute(session.connection())
                    .await
                {
                    Ok(_) => Outcome::Success(account_id),
                    Err(error) => Outcome::Failure(map_diesel_error(error)),
                }
            }
            .scope_boxed()
        });

        composer.add_step(move |session, account_id| {
            async move {
                let row = NewAuditEventRow {
                    id: Uuid::new_v4(),
                    user_id: account_id,
                    action: ACCOUNT_REGISTERED,
                };
                match diesel::insert_into(audit_events::table)
                    .values(&row)
                    .execute(session.connection())
                    .await
                {
                    Ok(_) => Outcome::Success(account_id),
                    Err(error) => Outcome::Failure(map_diesel_error(error)),
                }
            }
            .scope_boxed()
        });

        let seed = *user.id().as_uuid();
        composer.execute(seed).await.map(move |_account_id| {
            let membership = Membership::new(*user.id(), period);
            RegisteredAccount::new(user, membership)
        })
    }

    async fn find_by_username(&self, username: &Username) -> Outcome<Option<User>> {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(error) => return map_pool_error(error).into(),
        };

        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional();

        match row {
            Ok(None) => Outcome::Success(None),
            Ok(Some(row)) => match row_to_user(row) {
                Ok(user) => Outcome::Success(Some(user)),
                Err(error) => error.into(),
            },
            Err(error) => map_diesel_error(error).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for repository error mapping.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_service_unavailable() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(
            error.message().contains("connection refused"),
            "preserve useful diagnostics"
        );
    }

    #[rstest]
    fn diesel_not_found_maps_to_not_found() {
        let error = map_diesel_error(diesel::result::Error::NotFound);

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "record not found");
    }

    #[rstest]
    fn corrupt_role_values_surface_as_internal_errors() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "ada.lovelace".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            role: "overlord".to_owned(),
        };

        let error = row_to_user(row).expect_err("unknown role must fail");
        assert_eq!(error.code(), ErrorCode::InternalError);
        assert!(error.message().contains("invalid user role"));
    }

    #[rstest]
    fn intact_rows_rehydrate_the_domain_user() {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            username: "ada.lovelace".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            role: "moderator".to_owned(),
        };

        let user = row_to_user(row).expect("intact row must convert");
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.role(), UserRole::Moderator);
    }
}
