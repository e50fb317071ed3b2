//! Closed success/failure container used across the application.
//!
//! Every fallible domain and persistence operation reports through
//! [`Outcome`] rather than throwing: failure is a first-class, inspectable
//! return value. Consumers either pattern match on the two variants or call
//! [`Outcome::fold`], which forces both branches to be handled at the call
//! site.

use super::Error;

/// Result of a domain or persistence operation.
///
/// Exactly one of a success payload or an [`Error`] descriptor. The two
/// variants are the container's constructors; error-returning paths can also
/// rely on the [`From<Error>`] conversion so `error.into()` reads the same
/// as a bare success value.
///
/// ## Invariants
/// - Never simultaneously success and failure; the wrong-state accessors
///   [`Outcome::success`] and [`Outcome::failure`] panic rather than guess.
/// - Immutable once constructed; consumed by value exactly once.
///
/// # Examples
/// ```
/// use backend::domain::{Error, Outcome};
///
/// fn half(value: u32) -> Outcome<u32> {
///     if value % 2 == 0 {
///         Outcome::Success(value / 2)
///     } else {
///         Error::invalid_request("odd input").into()
///     }
/// }
///
/// let label = half(4).fold(|v| format!("ok: {v}"), |e| format!("err: {e}"));
/// assert_eq!(label, "ok: 2");
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation concluded with a payload.
    Success(T),
    /// The operation concluded with a failure descriptor.
    Failure(Error),
}

impl<T> Outcome<T> {
    /// True when the outcome holds a success payload.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// True when the outcome holds a failure descriptor.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Extract the success payload.
    ///
    /// # Panics
    /// Panics when called on a failure: that is a bug in the caller, not a
    /// runtime condition. Check state first or use [`Outcome::fold`].
    pub fn success(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => {
                panic!("success() called on a failure outcome: {error}")
            }
        }
    }

    /// Extract the failure descriptor.
    ///
    /// # Panics
    /// Panics when called on a success; symmetric to [`Outcome::success`].
    pub fn failure(self) -> Error {
        match self {
            Self::Success(_) => panic!("failure() called on a success outcome"),
            Self::Failure(error) => error,
        }
    }

    /// Dispatch on the current state with both branches mandatory.
    ///
    /// Exactly one of the two functions runs and its return value is
    /// returned. This is the sanctioned way to consume an outcome without a
    /// prior state check.
    pub fn fold<U>(
        self,
        on_success: impl FnOnce(T) -> U,
        on_failure: impl FnOnce(Error) -> U,
    ) -> U {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Transform the success payload, passing failures through untouched.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(op(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Chain another fallible operation off the success payload.
    pub fn and_then<U>(self, op: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(value) => op(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Self::Failure(error)
    }
}

#[cfg(test)]
mod tests;
