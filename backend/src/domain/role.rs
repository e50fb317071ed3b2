//! Account role enum and its string persistence mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authorisation role attached to a user account.
///
/// Persisted as its lowercase string form; [`UserRole::as_str`] and the
/// [`FromStr`] impl are the canonical mapping in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Member,
    Moderator,
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Administrator => "administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`UserRole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUserRoleError {
    pub input: String,
}

impl fmt::Display for ParseUserRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid user role: {}", self.input)
    }
}

impl std::error::Error for ParseUserRoleError {}

impl FromStr for UserRole {
    type Err = ParseUserRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "member" => Ok(Self::Member),
            "moderator" => Ok(Self::Moderator),
            "administrator" => Ok(Self::Administrator),
            _ => Err(ParseUserRoleError {
                input: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UserRole::Member, "member")]
    #[case(UserRole::Moderator, "moderator")]
    #[case(UserRole::Administrator, "administrator")]
    fn roles_round_trip_through_their_string_form(#[case] role: UserRole, #[case] text: &str) {
        assert_eq!(role.as_str(), text);
        assert_eq!(text.parse::<UserRole>(), Ok(role));
    }

    #[rstest]
    fn unknown_role_strings_are_rejected() {
        let err = "owner".parse::<UserRole>().expect_err("unknown role");
        assert_eq!(err.input, "owner");
    }

    #[rstest]
    fn serde_uses_the_same_snake_case_form() {
        let encoded = serde_json::to_string(&UserRole::Moderator).expect("serialise");
        assert_eq!(encoded, "\"moderator\"");
    }
}
