//! # PullTask: the public task surface.
//!
//! [`PullTask`] wires a [`Source`](crate::Source) and a
//! [`Handler`](crate::Handler) to the worker loop and exposes lifecycle
//! control, the observable history, and both reprioritization overlays.
//!
//! ## High-level architecture
//! ```text
//! PullTask::start()
//!     └─► Lifecycle: Idle → Executing, tokio::spawn(Worker::run(token))
//!
//! Worker ──writes──► HistoryStore ◄──mark/unmark/remove── callers
//!                        │
//!                        └──broadcast Update──► snapshot()/subscribe() readers
//!
//! PullTask::cancel()
//!     └─► Lifecycle: → Cancelled(cause), token fires, waits abort promptly
//! ```
//!
//! Task instances are independent: each owns its store, priority set, and
//! cancellation token. No cross-task state exists.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::core::config::TaskConfig;
use crate::core::status::{CancelCause, Lifecycle, StatusKind};
use crate::core::worker::Worker;
use crate::error::RuntimeError;
use crate::history::{HistoryStore, Update};
use crate::outcome::Outcome;
use crate::policies::PrioritySet;
use crate::tasks::{Element, HandlerRef, SourceRef};

/// A continuously-running task that does not complete on its own.
///
/// Periodically pulls a batch from its source and handles each element,
/// tracking per-element outcomes with bounded, paced retries.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskpull::{HandlerFn, Outcome, PullTask, SourceFn, TaskConfig};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let cfg = TaskConfig {
///         pull_interval: Duration::from_millis(10),
///         handle_interval: Duration::from_millis(10),
///         update_capacity: 64,
///     };
///     let task = PullTask::with_config(
///         SourceFn::arc(|| async { Ok(vec!["f1".to_string()]) }),
///         HandlerFn::arc(|_file: String| async { Outcome::Success }),
///         cfg,
///     );
///
///     task.start().await.unwrap();
///     tokio::time::sleep(Duration::from_millis(50)).await;
///     task.cancel().await;
///
///     assert_eq!(task.snapshot().await.get("f1"), Some(&Outcome::Success));
/// }
/// ```
pub struct PullTask<E> {
    cfg: TaskConfig,
    source: SourceRef<E>,
    handler: HandlerRef<E>,
    store: Arc<HistoryStore<E>>,
    priorities: Arc<PrioritySet<E>>,
    lifecycle: Arc<Lifecycle>,
}

impl<E: Element> PullTask<E> {
    /// Creates a task with the default configuration (1s intervals).
    pub fn new(source: SourceRef<E>, handler: HandlerRef<E>) -> Self {
        Self::with_config(source, handler, TaskConfig::default())
    }

    /// Creates a task with an explicit configuration.
    pub fn with_config(source: SourceRef<E>, handler: HandlerRef<E>, cfg: TaskConfig) -> Self {
        Self {
            source,
            handler,
            store: Arc::new(HistoryStore::new(cfg.update_capacity)),
            priorities: Arc::new(PrioritySet::new()),
            lifecycle: Arc::new(Lifecycle::new()),
            cfg,
        }
    }

    // ---- Lifecycle ----

    /// Starts the loop as a background tokio task and returns immediately.
    ///
    /// Valid only from [`StatusKind::Idle`]; any other state yields
    /// [`RuntimeError::AlreadyStarted`].
    pub async fn start(&self) -> Result<(), RuntimeError> {
        let worker = Worker {
            source: Arc::clone(&self.source),
            handler: Arc::clone(&self.handler),
            store: Arc::clone(&self.store),
            priorities: Arc::clone(&self.priorities),
            cfg: self.cfg,
            lifecycle: Arc::clone(&self.lifecycle),
        };
        self.lifecycle
            .begin(|token| tokio::spawn(worker.run(token)))
            .await
    }

    /// Requests shutdown without a reason.
    ///
    /// Transitions to `Cancelled`, stops the loop, and interrupts any
    /// in-flight wait immediately. Calling it again is a no-op.
    pub async fn cancel(&self) {
        self.lifecycle.cancel(CancelCause::Requested(None)).await;
    }

    /// Requests shutdown with a human-readable reason.
    pub async fn cancel_with(&self, reason: impl Into<Arc<str>>) {
        self.lifecycle
            .cancel(CancelCause::Requested(Some(reason.into())))
            .await;
    }

    /// Returns the current lifecycle state.
    pub async fn status(&self) -> StatusKind {
        self.lifecycle.kind().await
    }

    /// Returns true once cancellation has been requested or has happened.
    pub fn cancelled(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    /// Returns why the task was cancelled, if it was.
    pub async fn cancel_cause(&self) -> Option<CancelCause> {
        self.lifecycle.cancel_cause().await
    }

    // ---- Observable history ----

    /// Returns the merged point-in-time history (main store ⊕ held overlay).
    pub async fn snapshot(&self) -> HashMap<E, Outcome> {
        self.store.snapshot().await
    }

    /// Returns the current outcome of one element.
    pub async fn outcome(&self, element: &E) -> Option<Outcome> {
        self.store.outcome(element).await
    }

    /// Creates a receiver observing every subsequent history transition.
    pub fn subscribe(&self) -> broadcast::Receiver<Update<E>> {
        self.store.subscribe()
    }

    /// Drops an element's history entry.
    ///
    /// The element becomes eligible for fresh handling the next time a pull
    /// yields it, even if its previous outcome was terminal.
    pub async fn remove(&self, element: &E) -> Option<Outcome> {
        self.store.remove(element).await
    }

    // ---- Priority overlay ----

    /// Flags an element to be handled ahead of the rest of each batch.
    pub async fn promote(&self, element: E) -> bool {
        self.priorities.promote(element).await
    }

    /// Returns true if the element is currently promoted.
    pub async fn is_promoted(&self, element: &E) -> bool {
        self.priorities.is_promoted(element).await
    }

    /// Unflags all promoted elements.
    pub async fn clear_promoted(&self) {
        self.priorities.clear().await;
    }

    // ---- Hold-out overlay ----

    /// Withholds an element from handling, keeping its last outcome.
    pub async fn mark(&self, element: &E) -> bool {
        self.store.mark(element).await
    }

    /// Restores a withheld element, making it eligible again next cycle.
    pub async fn unmark(&self, element: &E) -> bool {
        self.store.unmark(element).await
    }

    /// Returns true if the element is currently withheld.
    pub async fn is_marked(&self, element: &E) -> bool {
        self.store.is_marked(element).await
    }

    /// Restores every withheld element.
    pub async fn clear_marked(&self) {
        self.store.unmark_all().await;
    }
}
