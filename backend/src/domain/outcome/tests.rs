//! Regression coverage for the outcome container.

use super::*;
use rstest::rstest;

fn sample_error() -> Error {
    Error::not_found("nothing here")
}

#[rstest]
fn success_reports_state_and_payload() {
    let outcome = Outcome::Success(41_u32);
    assert!(outcome.is_success());
    assert!(!outcome.is_failure());
    assert_eq!(outcome.success(), 41);
}

#[rstest]
fn failure_reports_state_and_error() {
    let outcome: Outcome<u32> = Outcome::Failure(sample_error());
    assert!(outcome.is_failure());
    assert!(!outcome.is_success());
    assert_eq!(outcome.failure(), sample_error());
}

#[rstest]
#[should_panic(expected = "success() called on a failure outcome")]
fn success_accessor_panics_on_failure() {
    let outcome: Outcome<u32> = Outcome::Failure(sample_error());
    let _ = outcome.success();
}

#[rstest]
#[should_panic(expected = "failure() called on a success outcome")]
fn failure_accessor_panics_on_success() {
    let outcome = Outcome::Success("fine");
    let _ = outcome.failure();
}

#[rstest]
fn fold_runs_exactly_the_success_branch() {
    let outcome = Outcome::Success(2_u32);
    let folded = outcome.fold(|v| v * 10, |_| unreachable!("failure branch must not run"));
    assert_eq!(folded, 20);
}

#[rstest]
fn fold_runs_exactly_the_failure_branch() {
    let outcome: Outcome<u32> = Outcome::Failure(sample_error());
    let folded = outcome.fold(
        |_| unreachable!("success branch must not run"),
        |error| error.message().to_owned(),
    );
    assert_eq!(folded, "nothing here");
}

#[rstest]
fn from_error_builds_a_failure() {
    let outcome: Outcome<()> = sample_error().into();
    assert!(outcome.is_failure());
}

#[rstest]
fn map_transforms_success_only() {
    assert_eq!(Outcome::Success(3_u32).map(|v| v + 1), Outcome::Success(4));

    let failed: Outcome<u32> = Outcome::Failure(sample_error());
    assert_eq!(failed.map(|v| v + 1), Outcome::Failure(sample_error()));
}

#[rstest]
fn and_then_chains_and_short_circuits() {
    let chained = Outcome::Success(3_u32).and_then(|v| Outcome::Success(v * 2));
    assert_eq!(chained, Outcome::Success(6));

    let failed: Outcome<u32> = Outcome::Failure(sample_error());
    let chained = failed.and_then(|_| -> Outcome<u32> {
        unreachable!("chained operation must not run after a failure")
    });
    assert_eq!(chained, Outcome::Failure(sample_error()));
}
