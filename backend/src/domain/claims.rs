//! Identity claims extracted from a user record.
//!
//! Claims are a read-only projection: whatever issues tokens or stamps
//! audit entries consumes them without reaching back into the aggregate.

use serde::{Deserialize, Serialize};

use super::role::UserRole;
use super::user::{DisplayName, User, UserId, Username};

/// Identity payload describing an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    subject: UserId,
    username: Username,
    display_name: DisplayName,
    role: UserRole,
}

impl Claims {
    /// Stable subject identifier (the user id).
    pub fn subject(&self) -> &UserId {
        &self.subject
    }

    /// Login handle of the subject.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name of the subject.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Authorisation role of the subject.
    pub fn role(&self) -> UserRole {
        self.role
    }
}

impl From<&User> for Claims {
    fn from(user: &User) -> Self {
        Self {
            subject: *user.id(),
            username: user.username().clone(),
            display_name: user.display_name().clone(),
            role: user.role(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample_user() -> User {
        User::new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid uuid"),
            Username::new("ada.lovelace").expect("valid username"),
            DisplayName::new("Ada Lovelace").expect("valid display name"),
            UserRole::Moderator,
        )
    }

    #[rstest]
    fn claims_mirror_the_user_record() {
        let user = sample_user();
        let claims = Claims::from(&user);

        assert_eq!(claims.subject(), user.id());
        assert_eq!(claims.username(), user.username());
        assert_eq!(claims.display_name(), user.display_name());
        assert_eq!(claims.role(), user.role());
    }

    #[rstest]
    fn claims_serialise_to_camel_case() {
        let claims = Claims::from(&sample_user());
        let value = serde_json::to_value(&claims).expect("serialise");

        assert_eq!(
            value,
            json!({
                "subject": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "username": "ada.lovelace",
                "displayName": "Ada Lovelace",
                "role": "moderator",
            })
        );
    }
}
