//! Ports connecting the domain to its driven adapters.
//!
//! Ports are `async_trait` traits owned by the domain; outbound adapters
//! implement them. Error enums live next to their port and carry the driver
//! message so adapters never leak driver types into the domain.

pub mod account_repository;
pub mod session;

pub use self::account_repository::AccountRepository;
pub use self::session::{SessionError, TransactionSession};
