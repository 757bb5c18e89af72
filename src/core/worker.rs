//! # Worker: the perpetual pull/handle cycle.
//!
//! One worker per task instance drives the loop until cancellation:
//!
//! ```text
//! loop {
//!   ├─► pull()            ── Err? → cancel task (PullFailed), exit
//!   ├─► seed new elements as Idle
//!   ├─► handleable = batch − held − terminal (pull order, deduped)
//!   ├─► order by PrioritySet (promoted first, stable)
//!   ├─► for each element (strictly sequential):
//!   │     ├─ cancelled? → exit
//!   │     ├─ handle_with_retry(element)
//!   │     └─ wait handle_interval      (between elements, not after the last)
//!   └─► wait pull_interval
//! }
//! ```
//!
//! ## Rules
//! - No parallel fan-out: elements of a cycle are handled one after another,
//!   deterministically given the ordering policy.
//! - Cancellation is consulted at the top of each cycle and before each
//!   element; every wait is `select!`-interruptible.
//! - A pull failure shuts the task down cleanly; it never panics the loop.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::config::TaskConfig;
use crate::core::runner::{handle_with_retry, sleep_unless_cancelled};
use crate::core::status::{CancelCause, Lifecycle};
use crate::history::HistoryStore;
use crate::policies::PrioritySet;
use crate::tasks::{Element, HandlerRef, SourceRef};

/// Owns one task's loop state; consumed by [`Worker::run`].
pub(crate) struct Worker<E> {
    pub(crate) source: SourceRef<E>,
    pub(crate) handler: HandlerRef<E>,
    pub(crate) store: Arc<HistoryStore<E>>,
    pub(crate) priorities: Arc<PrioritySet<E>>,
    pub(crate) cfg: TaskConfig,
    pub(crate) lifecycle: Arc<Lifecycle>,
}

impl<E: Element> Worker<E> {
    /// Runs the loop until the token fires or the source fails.
    pub(crate) async fn run(self, token: CancellationToken) {
        loop {
            if token.is_cancelled() {
                break;
            }

            let batch = match self.source.pull().await {
                Ok(batch) => batch,
                Err(error) => {
                    self.lifecycle.cancel(CancelCause::PullFailed(error)).await;
                    break;
                }
            };

            self.store.seed(&batch).await;
            let pending = self.store.handleable(&batch).await;
            let ordered = self.priorities.order(pending).await;

            let mut elements = ordered.into_iter().peekable();
            while let Some(element) = elements.next() {
                if token.is_cancelled() {
                    return;
                }
                handle_with_retry(&*self.handler, &element, &self.store, &self.cfg, &token)
                    .await;

                if elements.peek().is_some()
                    && !sleep_unless_cancelled(self.cfg.handle_interval, &token).await
                {
                    return;
                }
            }

            if !sleep_unless_cancelled(self.cfg.pull_interval, &token).await {
                break;
            }
        }
    }
}
