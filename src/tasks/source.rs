//! # Source abstraction and function-backed implementation.
//!
//! A [`Source`] yields the current batch of elements each cycle. The common
//! handle type is [`SourceRef`], an `Arc<dyn Source>` shared with the worker.
//!
//! A pull failure is fatal to the task, not to an element: the loop treats it
//! as an empty batch and shuts the task down with the error as cancel cause.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PullError;
use crate::tasks::Element;

/// Shared handle to a source.
pub type SourceRef<E> = Arc<dyn Source<E>>;

/// # Batch producer.
///
/// Called once per cycle; returns every element the task should currently
/// track. Elements already terminal in the history are filtered out by the
/// runtime, so a source may keep returning them.
#[async_trait]
pub trait Source<E: Element>: Send + Sync + 'static {
    /// Produces the current batch of elements.
    async fn pull(&self) -> Result<Vec<E>, PullError>;
}

/// Function-backed source implementation.
///
/// Wraps a closure that *creates* a new future per pull.
///
/// ## Example
/// ```
/// use taskpull::{SourceFn, SourceRef};
///
/// let source: SourceRef<String> = SourceFn::arc(|| async {
///     Ok(vec!["f1".to_string(), "f2".to_string()])
/// });
/// ```
pub struct SourceFn<F> {
    f: F,
}

impl<F> SourceFn<F> {
    /// Creates a new function-backed source.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the source and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<E, F, Fut> Source<E> for SourceFn<F>
where
    E: Element,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<E>, PullError>> + Send + 'static,
{
    async fn pull(&self) -> Result<Vec<E>, PullError> {
        (self.f)().await
    }
}
