//! # History change notifications.
//!
//! Every mutation of a [`HistoryStore`](crate::HistoryStore) broadcasts one
//! [`Update`] carrying the element, its outcome after the mutation, and a
//! per-store monotonic sequence number.
//!
//! ## Ordering guarantees
//! `seq` increases monotonically per store. Use it to restore the exact write
//! order when updates are observed out of order; last value wins per element.

use std::time::SystemTime;

use crate::outcome::Outcome;

/// Classification of history mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// A newly observed element was inserted as `Idle`.
    Seeded,
    /// An outcome was written for an element.
    Recorded,
    /// An element was moved to the held overlay (withheld from handling).
    Marked,
    /// An element was restored from the held overlay.
    Unmarked,
    /// An element's entry was dropped entirely.
    Removed,
}

/// One history mutation, delivered to subscribers.
#[derive(Debug, Clone)]
pub struct Update<E> {
    /// Per-store monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp of the mutation.
    pub at: SystemTime,
    /// What kind of mutation happened.
    pub kind: UpdateKind,
    /// The element the mutation applies to.
    pub element: E,
    /// The element's outcome after the mutation.
    ///
    /// For [`UpdateKind::Removed`] this is the last outcome the entry had.
    pub outcome: Outcome,
}
