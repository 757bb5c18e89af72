//! # History store with a hold-out overlay.
//!
//! [`HistoryStore`] maps every element the task has seen to its latest
//! [`Outcome`], and layers a *held* overlay on top: marked elements move out
//! of the main map (keeping their last outcome) and are excluded from the
//! handleable computation until unmarked.
//!
//! ## Architecture
//! ```text
//!                 ┌──────────────── one RwLock ────────────────┐
//! worker writes ─►│  main: HashMap<E, Outcome>                 │◄─ mark/unmark/remove
//!                 │  held: HashMap<E, Outcome>  (withheld)     │
//!                 └──────────────┬─────────────────────────────┘
//!                                │ every mutation
//!                                ▼
//!                    broadcast::Sender<Update<E>>  ──► subscribers
//! ```
//!
//! ## Rules
//! - A key lives in **exactly one** of the two maps; mark/unmark moves happen
//!   under a single write lock, so no observer ever sees a half-applied move.
//! - The externally observed history is always main ⊕ held ([`snapshot`]).
//! - Slow subscribers get `RecvError::Lagged(n)` and skip `n` oldest updates;
//!   updates are not persisted.
//!
//! [`snapshot`]: HistoryStore::snapshot

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use tokio::sync::{RwLock, broadcast};

use crate::history::update::{Update, UpdateKind};
use crate::outcome::Outcome;
use crate::tasks::Element;

/// Main map plus held overlay, guarded together.
struct Shelves<E> {
    main: HashMap<E, Outcome>,
    held: HashMap<E, Outcome>,
}

/// Atomically-updated per-element outcome store.
///
/// ### Responsibilities
/// - Authoritative element → outcome mapping for one task instance
/// - Hold-out overlay (`mark`/`unmark`) excluded from handling
/// - Change notification via a bounded broadcast channel
pub struct HistoryStore<E> {
    inner: RwLock<Shelves<E>>,
    changes: broadcast::Sender<Update<E>>,
    seq: AtomicU64,
}

impl<E: Element> HistoryStore<E> {
    /// Creates an empty store with the given update-channel capacity.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let (changes, _rx) = broadcast::channel(capacity.max(1));
        Self {
            inner: RwLock::new(Shelves {
                main: HashMap::new(),
                held: HashMap::new(),
            }),
            changes,
            seq: AtomicU64::new(0),
        }
    }

    /// Returns the merged point-in-time history (main ⊕ held).
    pub async fn snapshot(&self) -> HashMap<E, Outcome> {
        let inner = self.inner.read().await;
        inner
            .main
            .iter()
            .chain(inner.held.iter())
            .map(|(e, o)| (e.clone(), o.clone()))
            .collect()
    }

    /// Returns the current outcome of one element, held or not.
    pub async fn outcome(&self, element: &E) -> Option<Outcome> {
        let inner = self.inner.read().await;
        inner
            .main
            .get(element)
            .or_else(|| inner.held.get(element))
            .cloned()
    }

    /// Creates a new receiver observing every subsequent mutation.
    ///
    /// A receiver only gets updates sent **after** it subscribes; last value
    /// wins per element.
    pub fn subscribe(&self) -> broadcast::Receiver<Update<E>> {
        self.changes.subscribe()
    }

    /// Inserts `Idle` for every batch element not yet seen.
    ///
    /// Held elements count as seen: re-pulling a marked element must not
    /// resurrect it into the main map.
    pub async fn seed(&self, batch: &[E]) {
        let mut inner = self.inner.write().await;
        for element in batch {
            if inner.main.contains_key(element) || inner.held.contains_key(element) {
                continue;
            }
            inner.main.insert(element.clone(), Outcome::Idle);
            self.publish(UpdateKind::Seeded, element.clone(), Outcome::Idle);
        }
    }

    /// Writes the latest outcome for an element.
    ///
    /// The write lands in whichever map currently owns the key (main for
    /// unseen elements), so a held entry keeps being held.
    pub async fn record(&self, element: &E, outcome: Outcome) {
        let mut inner = self.inner.write().await;
        if inner.held.contains_key(element) {
            inner.held.insert(element.clone(), outcome.clone());
        } else {
            inner.main.insert(element.clone(), outcome.clone());
        }
        self.publish(UpdateKind::Recorded, element.clone(), outcome);
    }

    /// Drops an element's entry from both maps.
    ///
    /// Returns the last outcome, if any. A removed element becomes eligible
    /// for fresh handling the next time a pull yields it.
    pub async fn remove(&self, element: &E) -> Option<Outcome> {
        let mut inner = self.inner.write().await;
        let last = inner
            .main
            .remove(element)
            .or_else(|| inner.held.remove(element));
        if let Some(outcome) = &last {
            self.publish(UpdateKind::Removed, element.clone(), outcome.clone());
        }
        last
    }

    /// Moves an element into the held overlay, keeping its last outcome.
    ///
    /// An element never seen before is held as `Idle`. Returns `false` if the
    /// element was already held.
    pub async fn mark(&self, element: &E) -> bool {
        let mut inner = self.inner.write().await;
        if inner.held.contains_key(element) {
            return false;
        }
        let outcome = inner.main.remove(element).unwrap_or(Outcome::Idle);
        inner.held.insert(element.clone(), outcome.clone());
        self.publish(UpdateKind::Marked, element.clone(), outcome);
        true
    }

    /// Restores a held element to the main map.
    ///
    /// Returns `false` if the element was not held.
    pub async fn unmark(&self, element: &E) -> bool {
        let mut inner = self.inner.write().await;
        match inner.held.remove(element) {
            Some(outcome) => {
                inner.main.insert(element.clone(), outcome.clone());
                self.publish(UpdateKind::Unmarked, element.clone(), outcome);
                true
            }
            None => false,
        }
    }

    /// Returns true if the element is currently held.
    pub async fn is_marked(&self, element: &E) -> bool {
        self.inner.read().await.held.contains_key(element)
    }

    /// Flushes every held entry back to the main map.
    pub async fn unmark_all(&self) {
        let mut inner = self.inner.write().await;
        let held: Vec<(E, Outcome)> = inner.held.drain().collect();
        for (element, outcome) in held {
            inner.main.insert(element.clone(), outcome.clone());
            self.publish(UpdateKind::Unmarked, element, outcome);
        }
    }

    /// Computes the handleable subset of a batch, preserving pull order.
    ///
    /// Excluded: held elements, elements with a terminal outcome, and
    /// duplicate sightings within the batch (an element is handled at most
    /// once per cycle).
    pub async fn handleable(&self, batch: &[E]) -> Vec<E> {
        let inner = self.inner.read().await;
        let mut seen = HashSet::new();
        batch
            .iter()
            .filter(|element| {
                if inner.held.contains_key(*element) || !seen.insert((*element).clone()) {
                    return false;
                }
                match inner.main.get(*element) {
                    Some(outcome) => outcome.is_handleable(),
                    None => true,
                }
            })
            .cloned()
            .collect()
    }

    /// Publishes one update; called with the write lock held so `seq` order
    /// matches write order.
    fn publish(&self, kind: UpdateKind, element: E, outcome: Outcome) {
        let update = Update {
            seq: self.seq.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            element,
            outcome,
        };
        let _ = self.changes.send(update);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::HandleError;

    fn store() -> HistoryStore<String> {
        HistoryStore::new(64)
    }

    fn f(name: &str) -> String {
        name.to_string()
    }

    #[tokio::test]
    async fn seed_inserts_idle_once() {
        let store = store();
        store.seed(&[f("f1"), f("f2")]).await;
        store.record(&f("f1"), Outcome::Success).await;
        store.seed(&[f("f1"), f("f2"), f("f3")]).await;

        assert_eq!(store.outcome(&f("f1")).await, Some(Outcome::Success));
        assert_eq!(store.outcome(&f("f2")).await, Some(Outcome::Idle));
        assert_eq!(store.outcome(&f("f3")).await, Some(Outcome::Idle));
    }

    #[tokio::test]
    async fn handleable_excludes_terminal_and_duplicates() {
        let store = store();
        let batch = vec![f("ok"), f("bad"), f("new"), f("new"), f("retry")];
        store.seed(&batch).await;
        store.record(&f("ok"), Outcome::Success).await;
        store.record(&f("bad"), Outcome::failure("boom")).await;
        store.record(&f("retry"), Outcome::retry(3)).await;

        assert_eq!(store.handleable(&batch).await, vec![f("new"), f("retry")]);
    }

    #[tokio::test]
    async fn mark_keeps_last_outcome_and_withholds() {
        let store = store();
        store.seed(&[f("f1")]).await;
        store.record(&f("f1"), Outcome::retry(2)).await;

        assert!(store.mark(&f("f1")).await);
        assert!(store.is_marked(&f("f1")).await);
        assert!(store.handleable(&[f("f1")]).await.is_empty());
        // Merged view still reflects the held entry.
        assert_eq!(store.outcome(&f("f1")).await, Some(Outcome::retry(2)));

        assert!(store.unmark(&f("f1")).await);
        assert_eq!(store.outcome(&f("f1")).await, Some(Outcome::retry(2)));
        assert_eq!(store.handleable(&[f("f1")]).await, vec![f("f1")]);
    }

    #[tokio::test]
    async fn mark_unknown_element_holds_idle() {
        let store = store();
        assert!(store.mark(&f("ghost")).await);
        assert_eq!(store.outcome(&f("ghost")).await, Some(Outcome::Idle));
        // Seeding must not resurrect the held key into the main map.
        store.seed(&[f("ghost")]).await;
        assert!(store.handleable(&[f("ghost")]).await.is_empty());

        assert!(store.unmark(&f("ghost")).await);
        assert_eq!(store.outcome(&f("ghost")).await, Some(Outcome::Idle));
    }

    #[tokio::test]
    async fn unmark_without_mark_is_a_noop() {
        let store = store();
        assert!(!store.unmark(&f("f1")).await);
        assert_eq!(store.outcome(&f("f1")).await, None);
    }

    #[tokio::test]
    async fn unmark_all_flushes_everything() {
        let store = store();
        store.seed(&[f("a"), f("b")]).await;
        store.mark(&f("a")).await;
        store.mark(&f("b")).await;
        store.unmark_all().await;

        assert!(!store.is_marked(&f("a")).await);
        assert!(!store.is_marked(&f("b")).await);
        assert_eq!(store.handleable(&[f("a"), f("b")]).await.len(), 2);
    }

    #[tokio::test]
    async fn remove_makes_element_fresh_again() {
        let store = store();
        store.seed(&[f("f1")]).await;
        store.record(&f("f1"), Outcome::Success).await;
        assert!(store.handleable(&[f("f1")]).await.is_empty());

        assert_eq!(store.remove(&f("f1")).await, Some(Outcome::Success));
        assert_eq!(store.outcome(&f("f1")).await, None);
        assert_eq!(store.handleable(&[f("f1")]).await, vec![f("f1")]);
    }

    #[tokio::test]
    async fn record_on_held_entry_stays_held() {
        let store = store();
        store.mark(&f("f1")).await;
        store.record(&f("f1"), Outcome::Success).await;

        assert!(store.is_marked(&f("f1")).await);
        assert_eq!(store.outcome(&f("f1")).await, Some(Outcome::Success));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions_in_write_order() {
        let store = store();
        let mut rx = store.subscribe();

        store.seed(&[f("f1")]).await;
        store.record(&f("f1"), Outcome::retry(3)).await;
        store.record(&f("f1"), Outcome::Success).await;

        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, UpdateKind::Seeded);
        assert_eq!(first.outcome, Outcome::Idle);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.kind, UpdateKind::Recorded);
        assert_eq!(second.outcome, Outcome::retry(3));

        let third = rx.recv().await.unwrap();
        assert_eq!(third.kind, UpdateKind::Recorded);
        assert_eq!(third.outcome, Outcome::Success);
        assert!(first.seq < second.seq && second.seq < third.seq);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_never_corrupt_the_store() {
        let store = Arc::new(store());
        let key = f("contested");

        let mut joins = Vec::new();
        for i in 0..32u32 {
            let store = Arc::clone(&store);
            let key = key.clone();
            joins.push(tokio::spawn(async move {
                match i % 4 {
                    0 => {
                        store.record(&key, Outcome::retry(i)).await;
                    }
                    1 => {
                        store.mark(&key).await;
                    }
                    2 => {
                        store.unmark(&key).await;
                    }
                    _ => {
                        store.remove(&key).await;
                    }
                }
            }));
        }
        for join in joins {
            join.await.unwrap();
        }

        // The key is present in at most one map, and if present its outcome
        // is one of the attempted writes (Idle from mark, or some Retry).
        let snapshot = store.snapshot().await;
        assert!(snapshot.len() <= 1);
        if let Some(outcome) = snapshot.get(&key) {
            assert!(matches!(outcome, Outcome::Idle | Outcome::Retry { .. }));
        }
    }

    #[tokio::test]
    async fn exhausted_lineage_failure_is_preserved() {
        let store = store();
        store
            .record(
                &f("f1"),
                Outcome::Failure(HandleError::RetryLimitExceeded { limit: 2 }),
            )
            .await;
        assert!(store.handleable(&[f("f1")]).await.is_empty());
    }
}
