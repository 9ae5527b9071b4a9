use std::sync::{Arc, RwLock};

use crate::store::listeners::{Listener, ListenerSet, Subscription};
use crate::store::value::{identical, Snapshot, Value};
use crate::store::ExternalStore;

struct SlotInner {
    slots: Vec<Value>,
    listeners: ListenerSet,
    snapshot: Snapshot,
}

/// The indexed store variant: an ordered sequence of slots addressed by
/// claim order, with equality-gated change notification.
///
/// Slots are claimed in call order and the sequence only grows; a claimed
/// index stays valid for the store's lifetime. Writing a value identical
/// to the current slot contents leaves the published [`Snapshot`]
/// untouched and notifies nobody; an effective write replaces the slot,
/// publishes a fresh snapshot (a shallow copy of the sequence), and
/// synchronously notifies every registered listener before returning.
///
/// Cloning a `SlotStore` clones a handle to the same store.
pub struct SlotStore {
    inner: Arc<RwLock<SlotInner>>,
}

impl SlotStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SlotInner {
                slots: Vec::new(),
                listeners: ListenerSet::new(),
                snapshot: Snapshot::empty(),
            })),
        }
    }

    /// The most recently published snapshot.
    ///
    /// O(1) and allocation-free; hosts may call this on every render
    /// attempt. The returned reference only changes when a slot did.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().unwrap().snapshot.clone()
    }

    /// Claim the next slot, initializing it with `initial`.
    ///
    /// The claimed index equals the slot count at claim time. The
    /// snapshot is republished so the new slot is visible to the next
    /// read, but listeners are not notified: a claim is initialization,
    /// not a change.
    pub fn claim(&self, initial: Value) -> usize {
        let mut inner = self.inner.write().unwrap();
        let index = inner.slots.len();
        inner.slots.push(initial);
        inner.snapshot = Snapshot::publish(&inner.slots);
        tracing::trace!(index, "claimed slot");
        index
    }

    /// Replace the value at `index` and notify listeners.
    ///
    /// No-op when `next` is identical to the current value (same `Arc`
    /// or equal payload): unchanged values must not trigger a re-render.
    /// Writes past the end of the slot sequence are ignored.
    ///
    /// Fan-out runs outside the store lock over the listener set as it
    /// was at publish time, so listeners may subscribe, unsubscribe, or
    /// re-enter `write`. Nothing guards against notify storms from
    /// re-entrant writes.
    pub fn write(&self, index: usize, next: Value) {
        let fan_out = {
            let mut inner = self.inner.write().unwrap();
            match inner.slots.get(index) {
                None => {
                    tracing::warn!(
                        index,
                        slots = inner.slots.len(),
                        "write past end of slot sequence ignored"
                    );
                    return;
                }
                Some(current) if identical(current, &next) => return,
                Some(_) => {}
            }
            inner.slots[index] = next;
            inner.snapshot = Snapshot::publish(&inner.slots);
            tracing::trace!(index, "published snapshot");
            inner.listeners.collect()
        };
        for listener in fan_out {
            listener();
        }
    }

    /// Live read of the slot at `index`, bypassing the snapshot.
    ///
    /// This is what the updater form of a setter uses to see the current
    /// value at call time. Absent slots are `None`.
    pub fn value(&self, index: usize) -> Option<Value> {
        self.inner.read().unwrap().slots.get(index).cloned()
    }

    /// Number of claimed slots.
    pub fn slot_count(&self) -> usize {
        self.inner.read().unwrap().slots.len()
    }

    /// Register a change listener.
    ///
    /// The listener is never invoked from `subscribe` itself; it runs on
    /// every effective write until the returned guard removes it.
    /// Registering the same [`Listener`] twice stores it once.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let key = self.inner.write().unwrap().listeners.insert(listener);
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut inner) = inner.write() {
                    inner.listeners.remove(key);
                }
            }
        })
    }

    /// Whether two handles refer to the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SlotStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ExternalStore for SlotStore {
    type Snapshot = Snapshot;

    fn snapshot(&self) -> Snapshot {
        SlotStore::snapshot(self)
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        SlotStore::subscribe(self, listener)
    }

    fn snapshot_unchanged(prev: &Snapshot, next: &Snapshot) -> bool {
        prev.ptr_eq(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::listeners::listener;
    use crate::store::value::value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn claim_assigns_sequential_indices() {
        let store = SlotStore::new();
        assert_eq!(store.claim(value(1i32)), 0);
        assert_eq!(store.claim(value(String::from("Hola"))), 1);
        assert_eq!(store.slot_count(), 2);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.value_of::<i32>(0), Some(1));
        assert_eq!(snapshot.value_of::<String>(1), Some(String::from("Hola")));
    }

    #[test]
    fn claim_republishes_without_notifying() {
        let store = SlotStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let sub = store.subscribe(listener(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let before = store.snapshot();
        store.claim(value(0i32));
        let after = store.snapshot();

        assert!(!before.ptr_eq(&after));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        drop(sub);
    }

    #[test]
    fn write_gates_on_identical_value() {
        let store = SlotStore::new();
        let index = store.claim(value(5i32));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let _sub = store.subscribe(listener(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let before = store.snapshot();
        store.write(index, value(5i32));
        assert!(before.ptr_eq(&store.snapshot()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.write(index, value(6i32));
        assert!(!before.ptr_eq(&store.snapshot()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn write_past_end_is_ignored() {
        let store = SlotStore::new();
        let before = store.snapshot();
        store.write(3, value(1i32));
        assert!(before.ptr_eq(&store.snapshot()));
        assert_eq!(store.slot_count(), 0);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let store = SlotStore::new();
        let index = store.claim(value(0i32));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let sub = store.subscribe(listener(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        store.write(index, value(1i32));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        sub.unsubscribe();
        store.write(index, value(2i32));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reentrant_write_from_listener_does_not_deadlock() {
        let store = SlotStore::new();
        let first = store.claim(value(0i32));
        let second = store.claim(value(0i32));

        let inner = store.clone();
        let _sub = store.subscribe(listener(move || {
            // One-shot cascade: writing an identical value is gated,
            // so the second fan-out never recurses further.
            inner.write(second, value(99i32));
        }));

        store.write(first, value(1i32));
        assert_eq!(store.snapshot().value_of::<i32>(second), Some(99));
    }
}
