//! # Run one element through its full retry lineage.
//!
//! Invokes the handler, and if it asks for a retry, paces bounded
//! re-invocations until the lineage resolves. Every outcome is recorded in
//! the history store as soon as it is known, so observers see the
//! attempt-in-progress state.
//!
//! ## Flow
//! ```text
//! handle(element)
//!   ├─ Idle/Success/Failure ──► record, done
//!   └─ Retry{limit, strategy}
//!        ├─► record Retry{attempt: 0}
//!        └─► while still Retry and attempt < limit:
//!              attempt += 1
//!              wait handle_interval + strategy.extra(attempt)   (cancellable)
//!              handle(element) again, record outcome
//!        └─► still Retry? record Failure(RetryLimitExceeded)
//! ```
//!
//! ## Rules
//! - At most `limit + 1` handler invocations per lineage.
//! - `attempt` is monotonic within a lineage; a re-invocation that returns a
//!   fresh `Retry` contributes its limit and strategy, never its attempt.
//! - Cancellation during a wait abandons the lineage; the last recorded
//!   outcome stays in place.

use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::core::config::TaskConfig;
use crate::error::HandleError;
use crate::history::HistoryStore;
use crate::outcome::Outcome;
use crate::tasks::{Element, Handler};

/// Handles one element, driving retries until the lineage resolves.
pub(crate) async fn handle_with_retry<E: Element>(
    handler: &dyn Handler<E>,
    element: &E,
    store: &HistoryStore<E>,
    cfg: &TaskConfig,
    token: &CancellationToken,
) {
    let first = handler.handle(element).await;
    let Outcome::Retry {
        mut limit,
        mut strategy,
        ..
    } = first
    else {
        store.record(element, first).await;
        return;
    };

    let mut attempt: u32 = 0;
    store
        .record(
            element,
            Outcome::Retry {
                limit,
                attempt,
                strategy,
            },
        )
        .await;

    while attempt < limit {
        attempt += 1;
        let wait = cfg.handle_interval + strategy.extra(attempt);
        if !sleep_unless_cancelled(wait, token).await {
            return;
        }

        match handler.handle(element).await {
            Outcome::Retry {
                limit: next_limit,
                strategy: next_strategy,
                ..
            } => {
                // The latest handler response wins the limit and strategy;
                // the attempt counter belongs to the lineage.
                limit = next_limit;
                strategy = next_strategy;
                store
                    .record(
                        element,
                        Outcome::Retry {
                            limit,
                            attempt,
                            strategy,
                        },
                    )
                    .await;
            }
            resolved => {
                store.record(element, resolved).await;
                return;
            }
        }
    }

    store
        .record(
            element,
            Outcome::Failure(HandleError::RetryLimitExceeded { limit }),
        )
        .await;
}

/// Sleeps for `duration` unless the token fires first.
///
/// Returns `false` when interrupted by cancellation.
pub(crate) async fn sleep_unless_cancelled(
    duration: Duration,
    token: &CancellationToken,
) -> bool {
    select! {
        _ = time::sleep(duration) => true,
        _ = token.cancelled() => false,
    }
}
