//! # Per-element handling outcome.
//!
//! [`Outcome`] is the tagged result the runtime tracks for every element it
//! has seen. `Success` and `Failure` are terminal; `Idle` and `Retry` keep an
//! element eligible for handling on the next cycle.
//!
//! ```text
//! Idle ──► Retry{attempt=0} ──► Retry{attempt=1} ──► ... ──► Success
//!   │                                                  └────► Failure(RetryLimitExceeded)
//!   └─────────────────────────────────────────────────────► Success | Failure
//! ```
//!
//! ## Rules
//! - Terminal outcomes are **never** re-handled unless the element is removed
//!   from the history first.
//! - Within one retry lineage `attempt` only grows; the lineage ends in
//!   `Success`, `Failure`, or a synthesized `RetryLimitExceeded` failure.

use crate::error::HandleError;
use crate::policies::DelayStrategy;

/// Outcome of handling one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Seen but not yet attempted.
    Idle,
    /// Handled successfully (terminal).
    Success,
    /// Handled and failed permanently (terminal).
    Failure(HandleError),
    /// Handler asked for another attempt.
    Retry {
        /// Allowed retry attempts, not counting the original call.
        limit: u32,
        /// Retry attempts performed so far (0 before the first retry).
        attempt: u32,
        /// How the extra wait grows between attempts.
        strategy: DelayStrategy,
    },
}

impl Outcome {
    /// Requests a retry with the given limit and a constant wait.
    ///
    /// # Example
    /// ```
    /// use taskpull::{DelayStrategy, Outcome};
    ///
    /// let retry = Outcome::retry(3);
    /// assert_eq!(
    ///     retry,
    ///     Outcome::Retry { limit: 3, attempt: 0, strategy: DelayStrategy::Stable },
    /// );
    /// ```
    pub fn retry(limit: u32) -> Self {
        Self::retry_with(limit, DelayStrategy::Stable)
    }

    /// Requests a retry with the given limit and delay strategy.
    pub fn retry_with(limit: u32, strategy: DelayStrategy) -> Self {
        Outcome::Retry {
            limit,
            attempt: 0,
            strategy,
        }
    }

    /// Reports a permanent failure with the given message.
    pub fn failure(error: impl Into<String>) -> Self {
        Outcome::Failure(HandleError::Failed {
            error: error.into(),
        })
    }

    /// Returns true for `Success` and `Failure`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::Failure(_))
    }

    /// Returns true for outcomes that keep the element eligible for handling.
    pub fn is_handleable(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Outcome::Idle => "idle",
            Outcome::Success => "success",
            Outcome::Failure(_) => "failure",
            Outcome::Retry { .. } => "retry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_classification() {
        assert!(Outcome::Success.is_terminal());
        assert!(Outcome::failure("boom").is_terminal());
        assert!(!Outcome::Idle.is_terminal());
        assert!(!Outcome::retry(3).is_terminal());
    }

    #[test]
    fn handleable_is_the_complement() {
        for outcome in [
            Outcome::Idle,
            Outcome::Success,
            Outcome::failure("x"),
            Outcome::retry(1),
        ] {
            assert_ne!(outcome.is_terminal(), outcome.is_handleable());
        }
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(Outcome::Idle.as_label(), "idle");
        assert_eq!(Outcome::Success.as_label(), "success");
        assert_eq!(Outcome::failure("x").as_label(), "failure");
        assert_eq!(Outcome::retry(1).as_label(), "retry");
    }
}
