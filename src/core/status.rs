//! # Task lifecycle state machine.
//!
//! One task instance moves strictly forward:
//!
//! ```text
//! Idle ──start()──► Executing(join handle) ──cancel()/pull failure──► Cancelled(cause)
//! ```
//!
//! ## Rules
//! - No path back to `Idle` or `Executing`; a task instance runs at most once.
//! - `cancel` is idempotent: the first call wins, later calls are no-ops and
//!   the original cause is preserved.
//! - Cancellation fires the shared [`CancellationToken`], so every in-flight
//!   wait in the worker terminates promptly.

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{PullError, RuntimeError};

/// Why a task was cancelled.
#[derive(Debug, Clone)]
pub enum CancelCause {
    /// An external `cancel()` call, with an optional reason.
    Requested(Option<std::sync::Arc<str>>),
    /// The source failed; a pull failure is fatal to the loop.
    PullFailed(PullError),
}

/// Current lifecycle state, with the running loop's handle while executing.
enum Status {
    Idle,
    Executing(#[allow(dead_code)] JoinHandle<()>),
    Cancelled(CancelCause),
}

/// Copyable projection of [`Status`] for external queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Not started yet.
    Idle,
    /// The loop is running.
    Executing,
    /// Cancelled; the loop performs no further pulls or handles.
    Cancelled,
}

/// Shared lifecycle cell: status under a lock plus the cancellation token.
pub(crate) struct Lifecycle {
    status: RwLock<Status>,
    token: CancellationToken,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            status: RwLock::new(Status::Idle),
            token: CancellationToken::new(),
        }
    }

    /// Transitions `Idle → Executing`, spawning the loop via `spawn`.
    ///
    /// The spawn closure runs with the status write lock held, so a
    /// concurrent `begin` cannot launch a second loop.
    pub(crate) async fn begin<F>(&self, spawn: F) -> Result<(), RuntimeError>
    where
        F: FnOnce(CancellationToken) -> JoinHandle<()>,
    {
        let mut status = self.status.write().await;
        match *status {
            Status::Idle => {
                let handle = spawn(self.token.clone());
                *status = Status::Executing(handle);
                Ok(())
            }
            _ => Err(RuntimeError::AlreadyStarted {
                status: kind_of(&status),
            }),
        }
    }

    /// Transitions to `Cancelled(cause)` and fires the token.
    ///
    /// Returns `false` (and keeps the original cause) if already cancelled.
    pub(crate) async fn cancel(&self, cause: CancelCause) -> bool {
        let mut status = self.status.write().await;
        if matches!(*status, Status::Cancelled(_)) {
            return false;
        }
        self.token.cancel();
        *status = Status::Cancelled(cause);
        true
    }

    pub(crate) async fn kind(&self) -> StatusKind {
        kind_of(&*self.status.read().await)
    }

    pub(crate) async fn cancel_cause(&self) -> Option<CancelCause> {
        match &*self.status.read().await {
            Status::Cancelled(cause) => Some(cause.clone()),
            _ => None,
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

fn kind_of(status: &Status) -> StatusKind {
    match status {
        Status::Idle => StatusKind::Idle,
        Status::Executing(_) => StatusKind::Executing,
        Status::Cancelled(_) => StatusKind::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn begin_only_from_idle() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.kind().await, StatusKind::Idle);

        lifecycle
            .begin(|_token| tokio::spawn(async {}))
            .await
            .unwrap();
        assert_eq!(lifecycle.kind().await, StatusKind::Executing);

        let err = lifecycle
            .begin(|_token| tokio::spawn(async {}))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::AlreadyStarted {
                status: StatusKind::Executing
            }
        );
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_keeps_first_cause() {
        let lifecycle = Lifecycle::new();
        assert!(
            lifecycle
                .cancel(CancelCause::Requested(Some("first".into())))
                .await
        );
        assert!(
            !lifecycle
                .cancel(CancelCause::Requested(Some("second".into())))
                .await
        );

        assert!(lifecycle.is_cancelled());
        match lifecycle.cancel_cause().await {
            Some(CancelCause::Requested(Some(reason))) => assert_eq!(&*reason, "first"),
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_start_after_cancel() {
        let lifecycle = Lifecycle::new();
        lifecycle.cancel(CancelCause::Requested(None)).await;

        let err = lifecycle
            .begin(|_token| tokio::spawn(async {}))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::AlreadyStarted {
                status: StatusKind::Cancelled
            }
        );
    }
}
