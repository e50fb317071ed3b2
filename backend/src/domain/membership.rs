//! Membership records and period validation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Validation errors returned by [`MembershipPeriod::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipValidationError {
    EndsBeforeStarts {
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    },
}

impl fmt::Display for MembershipValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndsBeforeStarts { starts_on, ends_on } => write!(
                f,
                "membership must not end ({ends_on}) before it starts ({starts_on})",
            ),
        }
    }
}

impl std::error::Error for MembershipValidationError {}

/// Validity window of a membership.
///
/// ## Invariants
/// - `ends_on`, when present, is never before `starts_on`. An absent
///   `ends_on` means the membership is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipPeriod {
    starts_on: NaiveDate,
    ends_on: Option<NaiveDate>,
}

impl MembershipPeriod {
    /// Validate and construct a period from its bounds.
    pub fn new(
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
    ) -> Result<Self, MembershipValidationError> {
        if ends_on.is_some_and(|ends| ends < starts_on) {
            return Err(MembershipValidationError::EndsBeforeStarts {
                starts_on,
                ends_on: ends_on.unwrap_or(starts_on),
            });
        }

        Ok(Self { starts_on, ends_on })
    }

    /// First day the membership is valid.
    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    /// Last day the membership is valid, if bounded.
    pub fn ends_on(&self) -> Option<NaiveDate> {
        self.ends_on
    }

    /// Whether the period covers the given date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.starts_on && self.ends_on.is_none_or(|ends| date <= ends)
    }
}

/// Membership owned by a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "MembershipDto", into = "MembershipDto")]
pub struct Membership {
    user_id: UserId,
    period: MembershipPeriod,
}

impl Membership {
    /// Build a membership from validated components.
    pub fn new(user_id: UserId, period: MembershipPeriod) -> Self {
        Self { user_id, period }
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Validity window.
    pub fn period(&self) -> &MembershipPeriod {
        &self.period
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipDto {
    user_id: UserId,
    starts_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    ends_on: Option<NaiveDate>,
}

impl From<Membership> for MembershipDto {
    fn from(value: Membership) -> Self {
        let Membership { user_id, period } = value;
        Self {
            user_id,
            starts_on: period.starts_on(),
            ends_on: period.ends_on(),
        }
    }
}

impl TryFrom<MembershipDto> for Membership {
    type Error = MembershipValidationError;

    fn try_from(value: MembershipDto) -> Result<Self, Self::Error> {
        let MembershipDto {
            user_id,
            starts_on,
            ends_on,
        } = value;

        Ok(Membership::new(
            user_id,
            MembershipPeriod::new(starts_on, ends_on)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[rstest]
    fn period_rejects_end_before_start() {
        let err = MembershipPeriod::new(date(2024, 6, 1), Some(date(2024, 5, 1)))
            .expect_err("inverted range must fail");
        assert_eq!(
            err,
            MembershipValidationError::EndsBeforeStarts {
                starts_on: date(2024, 6, 1),
                ends_on: date(2024, 5, 1),
            }
        );
    }

    #[rstest]
    fn period_accepts_single_day_and_open_ranges() {
        let single = MembershipPeriod::new(date(2024, 6, 1), Some(date(2024, 6, 1)));
        assert!(single.is_ok());

        let open = MembershipPeriod::new(date(2024, 6, 1), None);
        assert!(open.is_ok());
    }

    #[rstest]
    #[case(date(2024, 6, 1), true)]
    #[case(date(2024, 6, 30), true)]
    #[case(date(2024, 5, 31), false)]
    #[case(date(2024, 7, 1), false)]
    fn bounded_period_activity(#[case] probe: NaiveDate, #[case] expected: bool) {
        let period = MembershipPeriod::new(date(2024, 6, 1), Some(date(2024, 6, 30)))
            .expect("valid period");
        assert_eq!(period.is_active_on(probe), expected);
    }

    #[rstest]
    fn open_period_is_active_indefinitely() {
        let period = MembershipPeriod::new(date(2024, 6, 1), None).expect("valid period");
        assert!(period.is_active_on(date(2124, 1, 1)));
        assert!(!period.is_active_on(date(2024, 5, 31)));
    }

    #[rstest]
    fn membership_round_trips_through_serde() {
        let membership = Membership::new(
            UserId::random(),
            MembershipPeriod::new(date(2024, 6, 1), Some(date(2025, 5, 31)))
                .expect("valid period"),
        );

        let encoded = serde_json::to_string(&membership).expect("serialise");
        let decoded: Membership = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, membership);
    }

    #[rstest]
    fn membership_deserialisation_enforces_the_period_invariant() {
        let payload = serde_json::json!({
            "userId": UserId::random().to_string(),
            "startsOn": "2024-06-01",
            "endsOn": "2024-01-01",
        });

        let result: Result<Membership, _> = serde_json::from_value(payload);
        assert!(result.is_err(), "inverted range must be rejected");
    }
}
