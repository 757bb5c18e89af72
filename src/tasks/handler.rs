//! # Handler abstraction and function-backed implementation.
//!
//! A [`Handler`] processes one element and reports an [`Outcome`]. The common
//! handle type is [`HandlerRef`], an `Arc<dyn Handler>` shared with the worker.
//!
//! ## Rules
//! - A handler must tolerate being invoked multiple times for the same
//!   element: retries re-invoke it with the element unchanged.
//! - Failure is data, not control flow: a permanent failure is reported as
//!   [`Outcome::Failure`], a recoverable one as [`Outcome::Retry`]. Neither
//!   aborts the loop.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::outcome::Outcome;
use crate::tasks::Element;

/// Shared handle to a handler.
pub type HandlerRef<E> = Arc<dyn Handler<E>>;

/// # Per-element processor.
#[async_trait]
pub trait Handler<E: Element>: Send + Sync + 'static {
    /// Processes one element and reports the outcome.
    async fn handle(&self, element: &E) -> Outcome;
}

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per invocation; the element is
/// cloned into the closure, so no shared mutable state is implied. If shared
/// state is needed, capture an `Arc<...>` explicitly.
///
/// ## Example
/// ```
/// use taskpull::{HandlerFn, HandlerRef, Outcome};
///
/// let handler: HandlerRef<String> = HandlerFn::arc(|file: String| async move {
///     if file.is_empty() {
///         Outcome::failure("empty file name")
///     } else {
///         Outcome::Success
///     }
/// });
/// ```
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<E, F, Fut> Handler<E> for HandlerFn<F>
where
    E: Element,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    async fn handle(&self, element: &E) -> Outcome {
        (self.f)(element.clone()).await
    }
}
