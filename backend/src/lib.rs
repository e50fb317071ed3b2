//! Membership backend library modules.
//!
//! The domain layer owns the typed [`domain::Outcome`] container and the
//! [`domain::TransactionComposer`] that drives atomic multi-step persistence.
//! Outbound adapters implement the domain ports against PostgreSQL.

pub mod domain;
pub mod outbound;
pub mod telemetry;
