//! # Observer trait and fan-out worker.
//!
//! An [`Observe`] implementation receives every history transition of one
//! store, in write order, last value wins per element. [`spawn_observer`]
//! bridges the store's broadcast channel to the observer on a background
//! task.
//!
//! ## Rules
//! - A slow observer lags rather than blocking writers: skipped updates
//!   surface as a `Lagged` gap and delivery continues with the newest items.
//! - The worker exits when the store (and with it the channel sender) drops.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::history::Update;
use crate::tasks::Element;

/// Hook into history transitions (logging, metrics, custom sinks).
#[async_trait]
pub trait Observe<E: Element>: Send + Sync + 'static {
    /// Called for each observed update, in sequence order.
    async fn on_update(&self, update: &Update<E>);
}

/// Forwards a subscription's updates to `observer` on a background task.
///
/// Pair with [`PullTask::subscribe`](crate::PullTask::subscribe). Returns the
/// worker's join handle; dropping it detaches the worker, which still exits
/// once the task (and with it the update channel) goes away.
pub fn spawn_observer<E: Element>(
    mut rx: broadcast::Receiver<Update<E>>,
    observer: Arc<dyn Observe<E>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(update) => observer.on_update(&update).await,
                Err(RecvError::Lagged(_skipped)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::history::HistoryStore;
    use crate::outcome::Outcome;

    struct Sink {
        seen: Mutex<Vec<Outcome>>,
    }

    #[async_trait]
    impl Observe<String> for Sink {
        async fn on_update(&self, update: &Update<String>) {
            self.seen.lock().unwrap().push(update.outcome.clone());
        }
    }

    #[tokio::test]
    async fn observer_sees_transitions_in_order() {
        let store = HistoryStore::new(64);
        let sink = Arc::new(Sink {
            seen: Mutex::new(Vec::new()),
        });
        let worker = spawn_observer(store.subscribe(), sink.clone() as Arc<dyn Observe<String>>);

        let element = "f1".to_string();
        store.seed(std::slice::from_ref(&element)).await;
        store.record(&element, Outcome::retry(2)).await;
        store.record(&element, Outcome::Success).await;

        drop(store);
        worker.await.unwrap();

        assert_eq!(
            *sink.seen.lock().unwrap(),
            vec![Outcome::Idle, Outcome::retry(2), Outcome::Success]
        );
    }
}
