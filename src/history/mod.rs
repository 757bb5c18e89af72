//! Per-element history: the only state shared between the loop and callers.
//!
//! ## Contents
//! - [`HistoryStore`] atomically-updated element → [`Outcome`](crate::Outcome)
//!   mapping with a hold-out overlay
//! - [`Update`], [`UpdateKind`] change notifications broadcast on every mutation
//!
//! ## Quick reference
//! - **Writers**: the worker loop (seed/record) and external callers
//!   (mark/unmark/remove); every path serializes through one `RwLock` writer.
//! - **Readers**: the worker (handleable computation) and observers
//!   (snapshots + subscriptions).

mod store;
mod update;

pub use store::HistoryStore;
pub use update::{Update, UpdateKind};
