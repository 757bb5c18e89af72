//! # Collaborator contracts consumed by the runtime.
//!
//! This module provides the traits the engine pulls work from and hands work
//! to, plus closure-backed adapters for quick wiring:
//! - [`Element`] - bound for work-item types (map key, shareable)
//! - [`Source`] / [`SourceRef`] - batch producer (`pull`)
//! - [`Handler`] / [`HandlerRef`] - per-element processor (`handle`)
//! - [`SourceFn`] / [`HandlerFn`] - function-backed implementations

mod handler;
mod source;

pub use handler::{Handler, HandlerFn, HandlerRef};
pub use source::{Source, SourceFn, SourceRef};

/// Bound for work-item types.
///
/// An element must behave as a stable map key (`Eq + Hash`), be cheap enough
/// to clone into history snapshots and updates, and cross task boundaries.
/// The blanket impl covers any type with those properties.
pub trait Element: Clone + Eq + std::hash::Hash + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Eq + std::hash::Hash + Send + Sync + 'static {}
