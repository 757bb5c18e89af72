//! # Simple console history printer (demo/reference only).
//!
//! [`LogWriter`] prints one line per history transition. It is intentionally
//! minimal: real embedders should implement [`Observe`] against their own
//! logging stack.

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::history::Update;
use crate::observers::Observe;
use crate::tasks::Element;

/// Prints history updates to stdout.
pub struct LogWriter<E> {
    _element: PhantomData<fn(E)>,
}

impl<E> LogWriter<E> {
    /// Creates a new log writer.
    pub fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }
}

impl<E> Default for LogWriter<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Element + Debug> Observe<E> for LogWriter<E> {
    async fn on_update(&self, update: &Update<E>) {
        println!(
            "[{seq:>6}] {kind:<8} element={element:?} outcome={label}",
            seq = update.seq,
            kind = format!("{:?}", update.kind).to_lowercase(),
            element = update.element,
            label = update.outcome.as_label(),
        );
    }
}
