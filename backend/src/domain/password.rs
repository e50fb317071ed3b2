//! Password strength rules and credential digest derivation.
//!
//! The plaintext never leaves [`Password`]; it is zeroized on drop and the
//! persistence layer only ever sees the salted [`PasswordDigest`]. Login
//! verification is owned by the authentication service, not this crate.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Minimum allowed password length.
pub const PASSWORD_MIN: usize = 10;
/// Maximum allowed password length.
pub const PASSWORD_MAX: usize = 128;

/// Validation errors returned by [`Password::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    TooShort { min: usize },
    TooLong { max: usize },
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "password must be at most {max} characters"),
            Self::MissingLowercase => write!(f, "password must contain a lowercase letter"),
            Self::MissingUppercase => write!(f, "password must contain an uppercase letter"),
            Self::MissingDigit => write!(f, "password must contain a digit"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// Validated password material, zeroized on drop.
///
/// ## Invariants
/// - Length within [`PASSWORD_MIN`]..=[`PASSWORD_MAX`] characters.
/// - Contains at least one lowercase letter, one uppercase letter, and one
///   digit.
/// - Caller-provided whitespace is preserved; credentials are never trimmed.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`] from owned input.
    pub fn new(password: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let password = Zeroizing::new(password.into());

        let length = password.chars().count();
        if length < PASSWORD_MIN {
            return Err(PasswordValidationError::TooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(PasswordValidationError::TooLong { max: PASSWORD_MAX });
        }

        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordValidationError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordValidationError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordValidationError::MissingDigit);
        }

        Ok(Self(password))
    }

    /// Access the plaintext for digest derivation.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(REDACTED)")
    }
}

/// Salted credential digest persisted with the account record.
///
/// Stored as `hex(salt)$hex(sha256(salt || password))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Derive a digest from validated password material with a fresh salt.
    pub fn derive(password: &Password) -> Self {
        let salt: [u8; 16] = rand::random();
        Self::derive_with_salt(password, &salt)
    }

    fn derive_with_salt(password: &Password, salt: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.expose().as_bytes());
        let digest = hasher.finalize();
        Self(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Stored string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ab1", PasswordValidationError::TooShort { min: PASSWORD_MIN })]
    #[case("correcthorse1", PasswordValidationError::MissingUppercase)]
    #[case("CORRECTHORSE1", PasswordValidationError::MissingLowercase)]
    #[case("CorrectHorse", PasswordValidationError::MissingDigit)]
    fn weak_passwords_are_rejected(
        #[case] input: &str,
        #[case] expected: PasswordValidationError,
    ) {
        let err = Password::new(input).expect_err("weak passwords must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn overlong_passwords_are_rejected() {
        let input = format!("Aa1{}", "x".repeat(PASSWORD_MAX));
        let err = Password::new(input).expect_err("too long");
        assert_eq!(err, PasswordValidationError::TooLong { max: PASSWORD_MAX });
    }

    #[rstest]
    #[case("Correct Horse 1")]
    #[case("Tr0ub4dour&3x!")]
    fn strong_passwords_are_accepted(#[case] input: &str) {
        let password = Password::new(input).expect("strong passwords must pass");
        assert_eq!(password.expose(), input);
    }

    #[rstest]
    fn debug_output_redacts_the_plaintext() {
        let password = Password::new("Correct Horse 1").expect("valid");
        assert_eq!(format!("{password:?}"), "Password(REDACTED)");
    }

    #[rstest]
    fn digests_are_salted() {
        let password = Password::new("Correct Horse 1").expect("valid");
        let first = PasswordDigest::derive(&password);
        let second = PasswordDigest::derive(&password);

        assert_ne!(first, second, "fresh salt per derivation");
    }

    #[rstest]
    fn digest_is_deterministic_for_a_fixed_salt() {
        let password = Password::new("Correct Horse 1").expect("valid");
        let salt = [7_u8; 16];

        let first = PasswordDigest::derive_with_salt(&password, &salt);
        let second = PasswordDigest::derive_with_salt(&password, &salt);

        assert_eq!(first, second);
        assert!(first.as_str().starts_with(&hex::encode(salt)));
    }
}
