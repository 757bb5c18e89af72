//! Retry pacing and reprioritization policies.
//!
//! This module groups the knobs that control **how long** to wait between
//! retry attempts and **in which order** a cycle handles its elements.
//!
//! ## Contents
//! - [`DelayStrategy`] how the extra retry wait grows with the attempt count
//! - [`PrioritySet`] promote-by-flag overlay for reordering handleable elements
//!
//! ## Quick wiring
//! ```text
//! Outcome::Retry { strategy, .. }
//!      └─► core::runner waits handle_interval + strategy.extra(attempt)
//!
//! PullTask::promote(e)
//!      └─► core::worker orders each cycle via PrioritySet::order()
//! ```

mod delay;
mod priority;

pub use delay::DelayStrategy;
pub use priority::PrioritySet;
