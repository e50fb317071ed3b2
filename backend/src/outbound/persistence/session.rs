//! Diesel-backed implementation of the transaction session port.

use async_trait::async_trait;
use diesel_async::{AsyncConnection, TransactionManager};

use crate::domain::ports::{SessionError, TransactionSession};

/// Adapts one Diesel connection to the domain's transaction session port.
///
/// Owns the connection for the lifetime of the scope; steps reach the
/// connection through [`DieselSession::connection`] to run their queries
/// inside the open transaction. If the session is dropped with the
/// transaction still open, Diesel's transaction manager discards the
/// uncommitted work when the connection is reclaimed.
pub struct DieselSession<C> {
    conn: C,
}

impl<C> DieselSession<C>
where
    C: AsyncConnection,
{
    /// Wrap a connection in a session.
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Access the underlying connection for queries.
    pub fn connection(&mut self) -> &mut C {
        &mut self.conn
    }
}

#[async_trait]
impl<C> TransactionSession for DieselSession<C>
where
    C: AsyncConnection + Send,
{
    async fn begin(&mut self) -> Result<(), SessionError> {
        <C::TransactionManager as TransactionManager<C>>::begin_transaction(&mut self.conn)
            .await
            .map_err(|err| SessionError::begin(err.to_string()))
    }

    async fn commit(&mut self) -> Result<(), SessionError> {
        <C::TransactionManager as TransactionManager<C>>::commit_transaction(&mut self.conn)
            .await
            .map_err(|err| SessionError::commit(err.to_string()))
    }

    async fn rollback(&mut self) -> Result<(), SessionError> {
        <C::TransactionManager as TransactionManager<C>>::rollback_transaction(&mut self.conn)
            .await
            .map_err(|err| SessionError::rollback(err.to_string()))
    }
}
