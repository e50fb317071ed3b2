//! Domain primitives, the outcome container, and the transaction composer.
//!
//! Purpose: define strongly typed domain entities and the two load-bearing
//! abstractions the rest of the application is glued around. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Outcome (alias to `outcome::Outcome`) — closed success/failure container.
//! - Error (alias to `error::Error`) — structured failure descriptor.
//! - TransactionComposer (alias to `transaction::TransactionComposer`) —
//!   ordered, all-or-nothing persistence step engine.
//! - User, UserRole, Claims, Membership — account aggregates and mappings.

pub mod claims;
pub mod error;
pub mod membership;
pub mod outcome;
pub mod password;
pub mod ports;
pub mod registration;
pub mod role;
pub mod transaction;
pub mod user;

pub use self::claims::Claims;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::membership::{Membership, MembershipPeriod, MembershipValidationError};
pub use self::outcome::Outcome;
pub use self::password::{Password, PasswordDigest, PasswordValidationError};
pub use self::registration::{
    NewAccount, RegisteredAccount, RegistrationRequest, RegistrationResponse, RegistrationService,
};
pub use self::role::{ParseUserRoleError, UserRole};
pub use self::transaction::{ComposerState, TransactionComposer};
pub use self::user::{DisplayName, User, UserId, UserValidationError, Username};
