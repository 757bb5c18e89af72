//! # Per-task configuration.
//!
//! [`TaskConfig`] centralizes the pacing knobs of one task instance:
//! how often to pull, how long to wait between handled elements, and the
//! capacity of the history update channel.

use std::time::Duration;

/// Pacing and capacity configuration for one task instance.
///
/// ## Field semantics
/// - `pull_interval`: wait between the end of one cycle and the next pull
/// - `handle_interval`: wait between successive elements within a cycle, and
///   the base wait before every retry attempt
/// - `update_capacity`: ring-buffer size of the history update channel
///   (min 1; clamped by the store)
#[derive(Clone, Copy, Debug)]
pub struct TaskConfig {
    /// Interval between pull cycles.
    pub pull_interval: Duration,
    /// Interval between handling actions.
    pub handle_interval: Duration,
    /// Capacity of the history update broadcast channel.
    ///
    /// Slow subscribers that lag behind more than this many updates observe
    /// `Lagged` and skip the oldest items.
    pub update_capacity: usize,
}

impl Default for TaskConfig {
    /// Default configuration:
    ///
    /// - `pull_interval = 1s`
    /// - `handle_interval = 1s`
    /// - `update_capacity = 1024`
    fn default() -> Self {
        Self {
            pull_interval: Duration::from_secs(1),
            handle_interval: Duration::from_secs(1),
            update_capacity: 1024,
        }
    }
}
