//! Reactive consumers of history updates.
//!
//! ## Contents
//! - [`Observe`] trait for hooking into history transitions
//! - [`spawn_observer`] forwards a store's broadcast stream to one observer
//! - [`LogWriter`] simple built-in console printer _(feature `logging`)_

mod observer;

#[cfg(feature = "logging")]
mod log;

pub use observer::{Observe, spawn_observer};

#[cfg(feature = "logging")]
pub use log::LogWriter;
