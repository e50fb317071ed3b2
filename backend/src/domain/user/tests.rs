//! Regression coverage for user validation and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

fn sample_user() -> User {
    User::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid uuid"),
        Username::new("ada.lovelace").expect("valid username"),
        DisplayName::new("Ada Lovelace").expect("valid display name"),
        UserRole::Member,
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("  3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] input: &str, #[case] expected: UserValidationError) {
    let err = UserId::new(input).expect_err("invalid ids must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn user_id_round_trips_through_display() {
    let id = UserId::random();
    let reparsed = UserId::new(id.to_string()).expect("display form is valid");
    assert_eq!(reparsed, id);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
#[case("Ada", UserValidationError::UsernameInvalidCharacters)]
#[case("ada lovelace", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] input: &str, #[case] expected: UserValidationError) {
    let err = Username::new(input).expect_err("invalid usernames must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn username_rejects_overlong_input() {
    let err = Username::new("a".repeat(USERNAME_MAX + 1)).expect_err("too long");
    assert_eq!(err, UserValidationError::UsernameTooLong { max: USERNAME_MAX });
}

#[rstest]
#[case("ada.lovelace")]
#[case("user_42")]
#[case("anne-with-an-e")]
fn username_accepts_valid_input(#[case] input: &str) {
    let username = Username::new(input).expect("valid usernames must pass");
    assert_eq!(username.as_ref(), input);
}

#[rstest]
#[case("", UserValidationError::EmptyDisplayName)]
#[case("   ", UserValidationError::EmptyDisplayName)]
#[case("Ada <3", UserValidationError::DisplayNameInvalidCharacters)]
fn display_name_rejects_invalid_input(#[case] input: &str, #[case] expected: UserValidationError) {
    let err = DisplayName::new(input).expect_err("invalid display names must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn user_serialises_to_camel_case() {
    let value = serde_json::to_value(sample_user()).expect("serialise");

    assert_eq!(
        value,
        json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "username": "ada.lovelace",
            "displayName": "Ada Lovelace",
            "role": "member",
        })
    );
}

#[rstest]
fn user_deserialisation_enforces_validation() {
    let payload = json!({
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "username": "Ada Lovelace",
        "displayName": "Ada",
        "role": "member",
    });

    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err(), "invalid username must be rejected");
}

#[rstest]
fn user_round_trips_through_serde() {
    let user = sample_user();
    let encoded = serde_json::to_string(&user).expect("serialise");
    let decoded: User = serde_json::from_str(&encoded).expect("deserialise");
    assert_eq!(decoded, user);
}
