//! # Delay strategy for retrying elements.
//!
//! [`DelayStrategy`] controls the **extra** wait added on top of the
//! per-element `handle_interval` before each retry attempt:
//!
//! - [`DelayStrategy::Stable`] — no extra wait; every retry waits exactly
//!   `handle_interval`.
//! - [`DelayStrategy::LinearUniform`] — the extra wait grows linearly:
//!   retry attempt `k` waits `handle_interval + increment × k`.
//!
//! The strategy travels inside [`Outcome::Retry`](crate::Outcome::Retry), so a
//! handler picks the pacing for its own retry lineage.

use std::time::Duration;

/// Extra-wait growth strategy for a retry lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStrategy {
    /// Constant wait: no extra delay on top of the handle interval.
    Stable,
    /// Linearly growing wait: `increment × attempt` extra delay.
    LinearUniform {
        /// Extra delay added per attempt.
        increment: Duration,
    },
}

impl Default for DelayStrategy {
    /// Returns [`DelayStrategy::Stable`].
    fn default() -> Self {
        DelayStrategy::Stable
    }
}

impl DelayStrategy {
    /// Computes the extra delay before retry attempt `attempt` (1-based).
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use taskpull::DelayStrategy;
    ///
    /// let stable = DelayStrategy::Stable;
    /// assert_eq!(stable.extra(4), Duration::ZERO);
    ///
    /// let linear = DelayStrategy::LinearUniform { increment: Duration::from_millis(250) };
    /// assert_eq!(linear.extra(1), Duration::from_millis(250));
    /// assert_eq!(linear.extra(4), Duration::from_secs(1));
    /// ```
    pub fn extra(&self, attempt: u32) -> Duration {
        match self {
            DelayStrategy::Stable => Duration::ZERO,
            DelayStrategy::LinearUniform { increment } => *increment * attempt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_adds_nothing() {
        for attempt in 0..10 {
            assert_eq!(DelayStrategy::Stable.extra(attempt), Duration::ZERO);
        }
    }

    #[test]
    fn linear_grows_with_attempt() {
        let strategy = DelayStrategy::LinearUniform {
            increment: Duration::from_millis(100),
        };
        assert_eq!(strategy.extra(0), Duration::ZERO);
        assert_eq!(strategy.extra(1), Duration::from_millis(100));
        assert_eq!(strategy.extra(2), Duration::from_millis(200));
        assert_eq!(strategy.extra(5), Duration::from_millis(500));
    }

    #[test]
    fn default_is_stable() {
        assert_eq!(DelayStrategy::default(), DelayStrategy::Stable);
    }
}
