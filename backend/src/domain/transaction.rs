//! Ordered, all-or-nothing composition of persistence steps.
//!
//! A [`TransactionComposer`] owns one [`TransactionSession`] and a list of
//! registered steps. Steps run strictly in registration order, each reading
//! the accumulated payload of its predecessors; the first failure stops the
//! pipeline and rolls the transaction back, and only a fully successful run
//! commits. The outcome reported to the caller is either the final payload
//! or the first error encountered, never a partial commit.
//!
//! # Finalization failures
//!
//! When commit or rollback itself fails the transactional guarantee is
//! broken, which is a different situation from a step's business failure.
//! Those errors are built with [`Error::transaction_failure`] and supersede
//! the step error that triggered the rollback (the step error stays
//! reachable through [`Error::caused_by`]).

use std::mem;

use scoped_futures::ScopedBoxFuture;
use serde_json::json;
use tracing::{debug, warn};

use super::ports::{SessionError, TransactionSession};
use super::{Error, Outcome};

/// One registered unit of transactional work.
type Step<'a, S, A> =
    Box<dyn for<'r> FnOnce(&'r mut S, A) -> ScopedBoxFuture<'a, 'r, Outcome<A>> + Send + 'a>;

/// Lifecycle of a composed transaction.
///
/// `Committed`, `RolledBack`, and `FinalizationFailed` are terminal; a
/// composer never leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// Transaction is open; steps may still be registered.
    Begun,
    /// Steps are running.
    Executing,
    /// Every step succeeded and the transaction committed.
    Committed,
    /// A step failed and the transaction rolled back.
    RolledBack,
    /// Commit or rollback itself failed.
    FinalizationFailed,
}

impl ComposerState {
    /// Stable string form used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begun => "begun",
            Self::Executing => "executing",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
            Self::FinalizationFailed => "finalization_failed",
        }
    }
}

impl std::fmt::Display for ComposerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composes dependent persistence steps under one atomic transaction.
///
/// The composer exclusively owns its session for the transaction's
/// lifetime. `A` is the accumulated payload threaded through the steps;
/// the payload returned by the final step is the transaction's result.
///
/// # Examples
/// ```ignore
/// let session = DieselSession::new(pool.get_owned().await?);
/// let mut composer = match TransactionComposer::begin(session).await {
///     Outcome::Success(composer) => composer,
///     Outcome::Failure(error) => return error.into(),
/// };
/// composer.add_step(|session, account_id| {
///     async move { insert_account(session, account_id).await }.scope_boxed()
/// });
/// composer.execute(account_id).await
/// ```
pub struct TransactionComposer<'a, S, A> {
    session: S,
    steps: Vec<Step<'a, S, A>>,
    state: ComposerState,
}

impl<'a, S, A> TransactionComposer<'a, S, A>
where
    S: TransactionSession,
    A: Send + 'a,
{
    /// Open a transaction on `session` and return the composer bound to it.
    ///
    /// A session that cannot start a transaction (connection lost, scope
    /// already open) yields a `ServiceUnavailable` failure.
    pub async fn begin(mut session: S) -> Outcome<Self> {
        if let Err(error) = session.begin().await {
            debug!(error = %error, "transaction begin failed");
            return Error::service_unavailable(error.to_string()).into();
        }

        Outcome::Success(Self {
            session,
            steps: Vec::new(),
            state: ComposerState::Begun,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// Register one unit of work; steps execute in registration order.
    ///
    /// # Panics
    /// Panics once execution has started: late registration is a bug in the
    /// caller and never alters an executed sequence.
    pub fn add_step<F>(&mut self, step: F)
    where
        F: for<'r> FnOnce(&'r mut S, A) -> ScopedBoxFuture<'a, 'r, Outcome<A>> + Send + 'a,
    {
        if self.state != ComposerState::Begun {
            panic!(
                "steps must be registered before execution starts (state: {})",
                self.state
            );
        }
        self.steps.push(Box::new(step));
    }

    /// Run the registered steps in order and finalize the transaction.
    ///
    /// `seed` is the initial payload handed to the first step. On the first
    /// failing step no further steps run, the transaction rolls back exactly
    /// once, and the step's error is returned verbatim. When every step
    /// succeeds the transaction commits exactly once and the final payload
    /// is returned. A failed commit is not followed by a rollback attempt.
    ///
    /// # Panics
    /// Panics when invoked again after a terminal state has been reached;
    /// the transaction scope is finalized at most once.
    pub async fn execute(&mut self, seed: A) -> Outcome<A> {
        if self.state != ComposerState::Begun {
            panic!("execute() called on a transaction in state {}", self.state);
        }
        self.state = ComposerState::Executing;

        let steps = mem::take(&mut self.steps);
        let total = steps.len();
        let mut payload = seed;

        for (index, step) in steps.into_iter().enumerate() {
            match step(&mut self.session, payload).await {
                Outcome::Success(next) => payload = next,
                Outcome::Failure(step_error) => {
                    debug!(
                        step = index + 1,
                        total,
                        error = %step_error,
                        "transaction step failed; rolling back"
                    );
                    return match self.session.rollback().await {
                        Ok(()) => {
                            self.state = ComposerState::RolledBack;
                            Outcome::Failure(step_error)
                        }
                        Err(rollback_error) => {
                            warn!(error = %rollback_error, "transaction rollback failed");
                            self.state = ComposerState::FinalizationFailed;
                            finalization_failure(&rollback_error, Some(step_error)).into()
                        }
                    };
                }
            }
        }

        match self.session.commit().await {
            Ok(()) => {
                self.state = ComposerState::Committed;
                Outcome::Success(payload)
            }
            Err(commit_error) => {
                warn!(error = %commit_error, "transaction commit failed");
                self.state = ComposerState::FinalizationFailed;
                finalization_failure(&commit_error, None).into()
            }
        }
    }
}

impl<S, A> Drop for TransactionComposer<'_, S, A> {
    fn drop(&mut self) {
        // Cancellation path: rollback cannot be awaited here, so the open
        // transaction is discarded when the session's connection is
        // reclaimed.
        if matches!(self.state, ComposerState::Begun | ComposerState::Executing) {
            warn!(
                state = %self.state,
                "transaction dropped before finalization; open transaction is discarded with its session"
            );
        }
    }
}

/// Build the error reported when commit or rollback itself fails.
fn finalization_failure(error: &SessionError, superseded: Option<Error>) -> Error {
    let failure = Error::transaction_failure(error.to_string())
        .with_details(json!({ "operation": error.operation() }));
    match superseded {
        Some(step_error) => failure.with_cause(step_error),
        None => failure,
    }
}
