// SPDX-License-Identifier: MPL-2.0
//! Shared handle to the toast store.
//!
//! `ToastQueue` is what the rest of the application holds: a cheap-to-clone
//! handle that serializes access to one [`Store`] and bumps a revision
//! counter on every change so renderers know when to re-read the list.

use super::record::{Position, ToastId, ToastRecord, ToastRequest};
use super::store::Store;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Clone)]
pub struct ToastQueue {
    store: Arc<Mutex<Store>>,
    revision: Arc<watch::Sender<u64>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new(store: Store) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            store: Arc::new(Mutex::new(store)),
            revision: Arc::new(revision),
        }
    }

    /// Raises a toast. See [`Store::add`].
    pub fn add(&self, request: ToastRequest) -> ToastId {
        let id = self.lock().add(request);
        self.bump();
        id
    }

    /// Removes a toast without running its `on_close`. Returns whether it
    /// was present.
    pub fn remove(&self, id: ToastId) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            self.bump();
        }
        removed
    }

    pub fn clear_delay(&self, id: ToastId) -> bool {
        let cleared = self.lock().clear_delay(id);
        if cleared {
            self.bump();
        }
        cleared
    }

    /// See [`Store::mark_delayed`].
    pub fn mark_delayed(&self, id: ToastId) -> bool {
        let marked = self.lock().mark_delayed(id);
        if marked {
            self.bump();
        }
        marked
    }

    /// Snapshot of the queue in display order.
    #[must_use]
    pub fn list(&self) -> Vec<ToastRecord> {
        self.lock().records().to_vec()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<ToastRecord> {
        self.lock().get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: ToastId) -> bool {
        self.lock().contains(id)
    }

    /// Delay flag of a record, `None` if it is not in the queue.
    #[must_use]
    pub fn is_delayed(&self, id: ToastId) -> Option<bool> {
        self.lock().get(id).map(ToastRecord::delay_animation)
    }

    #[must_use]
    pub fn current_position(&self) -> Position {
        self.lock().current_position()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Receiver notified on every queue change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Number of changes applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    // A panic inside a store call cannot leave the Vec half-mutated, so a
    // poisoned lock is safe to keep using.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Store::new())
    }
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("store", &*self.lock())
            .field("revision", &self.revision())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_store() {
        let queue = ToastQueue::default();
        let other = queue.clone();

        let id = queue.add(ToastRequest::success("Saved"));
        assert!(other.contains(id));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn revision_moves_only_on_change() {
        let queue = ToastQueue::default();
        let id = queue.add(ToastRequest::new("a"));
        assert_eq!(queue.revision(), 1);

        assert!(!queue.clear_delay(id));
        assert_eq!(queue.revision(), 1);

        assert!(queue.remove(id));
        assert!(!queue.remove(id));
        assert_eq!(queue.revision(), 2);
    }

    #[test]
    fn subscribers_see_changes() {
        let queue = ToastQueue::default();
        let mut rx = queue.subscribe();
        assert!(!rx.has_changed().unwrap_or(true));

        queue.add(ToastRequest::new("a"));
        assert!(rx.has_changed().unwrap_or(false));
        rx.mark_unchanged();

        let id = queue.list()[0].id();
        queue.mark_delayed(id);
        assert!(rx.has_changed().unwrap_or(false));
    }

    #[test]
    fn list_is_a_snapshot() {
        let queue = ToastQueue::default();
        queue.add(ToastRequest::new("a"));
        let snapshot = queue.list();
        queue.add(ToastRequest::new("b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(queue.len(), 2);
    }
}
