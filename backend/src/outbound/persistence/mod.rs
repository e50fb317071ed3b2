//! PostgreSQL persistence adapters built on Diesel.
//!
//! The pool hands out async connections, [`DieselSession`] adapts one
//! connection to the domain's transaction session port, and the repository
//! adapters translate between domain aggregates and row structs while
//! mapping driver errors to domain codes.

pub mod diesel_account_repository;
pub mod pool;
pub mod session;

pub(crate) mod models;
pub mod schema;

pub use self::diesel_account_repository::DieselAccountRepository;
pub use self::pool::{DbPool, PoolConfig, PoolError};
pub use self::session::DieselSession;
