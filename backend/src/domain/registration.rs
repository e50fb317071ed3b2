//! Account registration: request binding, validation, and the service
//! driving the persistence port.
//!
//! Validation happens once, at the boundary: a [`RegistrationRequest`] is
//! converted into a [`NewAccount`] of already-validated domain values, and
//! everything downstream works with those types only.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::claims::Claims;
use super::membership::{Membership, MembershipPeriod};
use super::password::Password;
use super::ports::AccountRepository;
use super::role::UserRole;
use super::user::{DisplayName, User, UserId, Username};
use super::{Error, Outcome};

/// Inbound registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RegistrationRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub starts_on: NaiveDate,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}

/// Validated registration payload handed to the persistence port.
///
/// New accounts always start with the [`UserRole::Member`] role; role
/// changes are a separate administrative operation.
#[derive(Debug, Clone)]
pub struct NewAccount {
    user: User,
    password: Password,
    period: MembershipPeriod,
}

impl NewAccount {
    /// The user record to persist, id freshly assigned.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Validated password material for digest derivation.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Validity window of the initial membership.
    pub fn period(&self) -> &MembershipPeriod {
        &self.period
    }
}

impl TryFrom<RegistrationRequest> for NewAccount {
    type Error = Error;

    fn try_from(value: RegistrationRequest) -> Result<Self, Self::Error> {
        let username = Username::new(value.username)
            .map_err(|err| Error::invalid_request(format!("invalid username: {err}")))?;
        let display_name = DisplayName::new(value.display_name)
            .map_err(|err| Error::invalid_request(format!("invalid display name: {err}")))?;
        let password = Password::new(value.password)
            .map_err(|err| Error::invalid_request(format!("invalid password: {err}")))?;
        let period = MembershipPeriod::new(value.starts_on, value.ends_on)
            .map_err(|err| Error::invalid_request(format!("invalid membership period: {err}")))?;

        Ok(Self {
            user: User::new(UserId::random(), username, display_name, UserRole::Member),
            password,
            period,
        })
    }
}

/// Everything persisted for a successfully registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAccount {
    user: User,
    membership: Membership,
}

impl RegisteredAccount {
    /// Build the aggregate from its persisted parts.
    pub fn new(user: User, membership: Membership) -> Self {
        Self { user, membership }
    }

    /// The persisted user record.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The persisted initial membership.
    pub fn membership(&self) -> &Membership {
        &self.membership
    }
}

/// Response payload for a completed registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub account: RegisteredAccount,
    pub claims: Claims,
}

/// Registration service driving the account repository port.
#[derive(Clone)]
pub struct RegistrationService<R> {
    accounts: Arc<R>,
}

impl<R> RegistrationService<R> {
    /// Create a new service with the given repository.
    pub fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }
}

impl<R> RegistrationService<R>
where
    R: AccountRepository,
{
    /// Validate the request and register the account atomically.
    ///
    /// Validation failures yield `InvalidRequest` outcomes without touching
    /// the repository; repository outcomes pass through verbatim, with the
    /// response claims extracted from the persisted user record.
    pub async fn register(&self, request: RegistrationRequest) -> Outcome<RegistrationResponse> {
        let account = match NewAccount::try_from(request) {
            Ok(account) => account,
            Err(error) => return error.into(),
        };

        self.accounts.register(&account).await.map(|registered| {
            let claims = Claims::from(registered.user());
            RegistrationResponse {
                account: registered,
                claims,
            }
        })
    }
}
