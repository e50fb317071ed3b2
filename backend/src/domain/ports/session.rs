//! Port abstraction over a live database transaction scope.

use async_trait::async_trait;

/// Errors raised by transaction session adapters.
///
/// Each variant names the lifecycle operation that failed so callers can
/// distinguish a transaction that never started from one whose finalization
/// broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The transaction could not be started.
    #[error("failed to begin transaction: {message}")]
    Begin { message: String },

    /// The transaction could not be committed.
    #[error("failed to commit transaction: {message}")]
    Commit { message: String },

    /// The transaction could not be rolled back.
    #[error("failed to roll back transaction: {message}")]
    Rollback { message: String },
}

impl SessionError {
    /// Create a begin error with the given driver message.
    pub fn begin(message: impl Into<String>) -> Self {
        Self::Begin {
            message: message.into(),
        }
    }

    /// Create a commit error with the given driver message.
    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit {
            message: message.into(),
        }
    }

    /// Create a rollback error with the given driver message.
    pub fn rollback(message: impl Into<String>) -> Self {
        Self::Rollback {
            message: message.into(),
        }
    }

    /// Name of the lifecycle operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Begin { .. } => "begin",
            Self::Commit { .. } => "commit",
            Self::Rollback { .. } => "rollback",
        }
    }
}

/// A session wrapping exactly one database transaction scope.
///
/// The composer owns the session exclusively for the lifetime of its
/// transaction; no other code may commit or roll it back concurrently.
/// Implementations must tolerate their own drop while a transaction is
/// open by discarding the uncommitted work when the connection is
/// reclaimed.
#[async_trait]
pub trait TransactionSession: Send {
    /// Open the transaction scope.
    async fn begin(&mut self) -> Result<(), SessionError>;

    /// Commit the open transaction.
    async fn commit(&mut self) -> Result<(), SessionError>;

    /// Roll back the open transaction.
    async fn rollback(&mut self) -> Result<(), SessionError>;
}
