//! Runtime core: the pull/handle loop and task lifecycle.
//!
//! The only public API from this module is [`PullTask`] (plus its config and
//! status types), which owns the perpetual loop and the cancellation state
//! machine.
//!
//! Internal modules:
//! - [`task`]: public task surface (start/cancel/history/overlays);
//! - [`worker`]: drives pull → seed → filter → order → handle → wait;
//! - [`runner`]: one element's full retry lineage with paced re-invocations;
//! - [`status`]: monotonic `Idle → Executing → Cancelled` state machine;
//! - [`config`]: interval and capacity knobs.

mod config;
mod runner;
mod status;
mod task;
mod worker;

pub use config::TaskConfig;
pub use status::{CancelCause, StatusKind};
pub use task::PullTask;
