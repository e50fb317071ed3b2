//! Port abstraction for account persistence adapters.

use async_trait::async_trait;

use crate::domain::registration::{NewAccount, RegisteredAccount};
use crate::domain::{Outcome, User, Username};

/// Persistence port for account registration and lookup.
///
/// All operations report through [`Outcome`] so the container propagates
/// unchanged across the service/adapter seam. `register` is atomic: either
/// every record it writes exists afterwards or none do.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account and everything it owns, all-or-nothing.
    async fn register(&self, account: &NewAccount) -> Outcome<RegisteredAccount>;

    /// Fetch a user by username.
    async fn find_by_username(&self, username: &Username) -> Outcome<Option<User>>;
}
