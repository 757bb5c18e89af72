//! # taskpull
//!
//! **Taskpull** is a lightweight engine for continuously-running pull/handle
//! tasks: it repeatedly pulls a batch of elements from a [`Source`], handles
//! each one with a [`Handler`], and tracks per-element outcomes with bounded
//! retry/backoff, cooperative cancellation, and dynamic reprioritization.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────┐    pull()     ┌─────────────────────────────────────────┐
//!   │  Source  │──────────────►│  Worker loop (one per PullTask)         │
//!   └──────────┘               │  pull → seed → filter → order → handle  │
//!   ┌──────────┐   handle(e)   │        retries paced by DelayStrategy   │
//!   │ Handler  │◄──────────────│        waits interruptible via token    │
//!   └──────────┘               └───────────────┬─────────────────────────┘
//!                                              │ record outcomes
//!                                              ▼
//!            mark/unmark/remove ──► ┌─────────────────────┐
//!            promote/clear ───────► │  HistoryStore       │──► snapshot()
//!                                   │  (main ⊕ held maps) │──► subscribe()
//!                                   └─────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! PullTask::start()        Idle → Executing, loop spawned on tokio
//!
//! loop {
//!   ├─► pull()                       ── Err → Cancelled(PullFailed), exit
//!   ├─► seed unseen elements as Idle
//!   ├─► handleable = batch − held − terminal
//!   ├─► promoted elements first (stable order)
//!   ├─► handle each element sequentially:
//!   │     Retry{limit, strategy} → paced re-invocations, at most limit + 1
//!   │     calls, exhaustion ⇒ Failure(RetryLimitExceeded)
//!   └─► wait pull_interval
//! }
//!
//! PullTask::cancel()       → Cancelled(Requested), waits abort promptly
//! ```
//!
//! ## Features
//! | Area          | Description                                              | Key types / traits                  |
//! |---------------|----------------------------------------------------------|-------------------------------------|
//! | **Collaborators** | Pluggable batch producer and element processor.      | [`Source`], [`Handler`]             |
//! | **Outcomes**  | Tagged per-element result with retry payloads.           | [`Outcome`], [`DelayStrategy`]      |
//! | **History**   | Atomically-updated, observable outcome store.            | [`HistoryStore`], [`Update`]        |
//! | **Overlays**  | Promote-by-flag and mark/hold-out reprioritization.      | [`PrioritySet`], [`PullTask::mark`] |
//! | **Lifecycle** | Monotonic status machine with idempotent cancel.         | [`PullTask`], [`StatusKind`]        |
//! | **Errors**    | Typed errors for sources, handlers, and the runtime.     | [`PullError`], [`HandleError`]      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskpull::{HandlerFn, Outcome, PullTask, SourceFn, TaskConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cfg = TaskConfig {
//!         pull_interval: Duration::from_millis(10),
//!         handle_interval: Duration::from_millis(10),
//!         update_capacity: 64,
//!     };
//!
//!     // Pull a fixed batch; succeed on everything.
//!     let task = PullTask::with_config(
//!         SourceFn::arc(|| async { Ok(vec!["f1".to_string(), "f2".to_string()]) }),
//!         HandlerFn::arc(|_file: String| async { Outcome::Success }),
//!         cfg,
//!     );
//!
//!     task.start().await.unwrap();
//!     tokio::time::sleep(Duration::from_millis(100)).await;
//!     task.cancel().await;
//!
//!     let history = task.snapshot().await;
//!     assert!(history.values().all(|outcome| outcome.is_terminal()));
//! }
//! ```

mod core;
mod error;
mod history;
mod observers;
mod outcome;
mod policies;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{CancelCause, PullTask, StatusKind, TaskConfig};
pub use error::{HandleError, PullError, RuntimeError};
pub use history::{HistoryStore, Update, UpdateKind};
pub use observers::{Observe, spawn_observer};
pub use outcome::Outcome;
pub use policies::{DelayStrategy, PrioritySet};
pub use tasks::{Element, Handler, HandlerFn, HandlerRef, Source, SourceFn, SourceRef};

// Optional: expose the simple built-in console printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
