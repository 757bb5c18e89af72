//! # Promote-by-flag overlay.
//!
//! [`PrioritySet`] keeps a set of promoted elements and applies it as a stable
//! sort when a cycle orders its handleable batch: promoted elements move to
//! the front, everything else keeps its pull order.
//!
//! ## Rules
//! - Ordering is a **stable** sort: relative pull order is preserved inside
//!   both the promoted and the unpromoted group.
//! - Mutations (`promote`, `clear`) are mutually exclusive with reads during
//!   ordering; a cycle observes either all or none of a promote call.

use std::collections::HashSet;

use tokio::sync::Mutex;

use crate::tasks::Element;

/// Set of elements to handle ahead of the rest of a batch.
pub struct PrioritySet<E> {
    flagged: Mutex<HashSet<E>>,
}

impl<E: Element> PrioritySet<E> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            flagged: Mutex::new(HashSet::new()),
        }
    }

    /// Flags an element for priority handling.
    ///
    /// Returns `false` if the element was already promoted.
    pub async fn promote(&self, element: E) -> bool {
        self.flagged.lock().await.insert(element)
    }

    /// Returns true if the element is currently promoted.
    pub async fn is_promoted(&self, element: &E) -> bool {
        self.flagged.lock().await.contains(element)
    }

    /// Unflags all promoted elements.
    pub async fn clear(&self) {
        self.flagged.lock().await.clear();
    }

    /// Orders a batch, moving promoted elements to the front.
    ///
    /// The sort is stable: within each group the incoming order survives.
    pub async fn order(&self, mut batch: Vec<E>) -> Vec<E> {
        let flagged = self.flagged.lock().await;
        if !flagged.is_empty() {
            // sort_by_key is stable; unpromoted keys (true) sink to the back.
            batch.sort_by_key(|element| !flagged.contains(element));
        }
        batch
    }
}

impl<E: Element> Default for PrioritySet<E> {
    fn default() -> Self {
        Self::new()
    }
}
