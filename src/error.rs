//! Error types used by the taskpull runtime and handlers.
//!
//! This module defines three error types:
//!
//! - [`PullError`] — the source failed to produce a batch; fatal to the loop.
//! - [`HandleError`] — a single element failed permanently.
//! - [`RuntimeError`] — misuse of the task lifecycle itself.
//!
//! All types provide `as_label` helpers for logging. Element-level errors
//! never abort the loop: they only surface through the history store.

use thiserror::Error;

use crate::core::StatusKind;

/// # Source failure.
///
/// Returned by [`Source::pull`](crate::Source::pull). A pull failure is fatal
/// to the whole task (the loop shuts down cleanly with this error as the
/// cancel cause), never to an individual element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("pull failed: {message}")]
pub struct PullError {
    /// The underlying error message.
    pub message: String,
}

impl PullError {
    /// Creates a new pull error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// # Per-element handling failure.
///
/// Carried inside [`Outcome::Failure`](crate::Outcome::Failure). Both variants
/// are terminal: the element is never handled again unless it is explicitly
/// removed from the history first.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The handler reported a non-recoverable failure for this element.
    #[error("handling failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// A retry lineage exhausted its limit without resolving.
    ///
    /// Synthesized by the retry engine; handlers never return this themselves.
    #[error("retry limit {limit} exceeded")]
    RetryLimitExceeded {
        /// The limit that was exhausted.
        limit: u32,
    },
}

impl HandleError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use taskpull::HandleError;
    ///
    /// let err = HandleError::RetryLimitExceeded { limit: 3 };
    /// assert_eq!(err.as_label(), "retry_limit_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandleError::Failed { .. } => "handle_failed",
            HandleError::RetryLimitExceeded { .. } => "retry_limit_exceeded",
        }
    }
}

/// # Errors produced by the task lifecycle.
///
/// These represent misuse of the runtime surface, not element failures.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `start()` was called while the task was not idle.
    ///
    /// The status machine is monotonic (`Idle → Executing → Cancelled`);
    /// a task instance can only be started once.
    #[error("task cannot start from status {status:?}")]
    AlreadyStarted {
        /// Status the task was in when `start()` was rejected.
        status: StatusKind,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::AlreadyStarted { .. } => "already_started",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_error_messages() {
        let failed = HandleError::Failed {
            error: "boom".into(),
        };
        assert_eq!(failed.to_string(), "handling failed: boom");
        assert_eq!(failed.as_label(), "handle_failed");

        let exhausted = HandleError::RetryLimitExceeded { limit: 2 };
        assert_eq!(exhausted.to_string(), "retry limit 2 exceeded");
    }

    #[test]
    fn pull_error_message() {
        let err = PullError::new("connection reset");
        assert_eq!(err.to_string(), "pull failed: connection reset");
    }
}
