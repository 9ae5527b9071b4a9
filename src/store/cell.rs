use std::sync::{Arc, RwLock};

use crate::store::listeners::{Listener, ListenerSet, Subscription};
use crate::store::value::Value;
use crate::store::ExternalStore;

struct CellInner {
    value: Option<Value>,
    listeners: ListenerSet,
}

/// The single-slot store variant: one value, no indexing.
///
/// Unlike [`SlotStore`](crate::store::SlotStore), `write` carries no
/// equality gate: every write replaces the stored value and notifies all
/// listeners, identical payload or not. The two variants are deliberately
/// kept separate rather than merged behind one switch.
///
/// The snapshot is the stored value itself; because each write installs a
/// freshly-allocated value, the snapshot reference changes on every
/// write, keeping the identity contract intact.
pub struct CellStore {
    inner: Arc<RwLock<CellInner>>,
}

impl CellStore {
    /// Create a new, empty cell.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CellInner {
                value: None,
                listeners: ListenerSet::new(),
            })),
        }
    }

    /// The current value by reference, `None` before the first seed or
    /// write. O(1), allocation-free.
    pub fn snapshot(&self) -> Option<Value> {
        self.inner.read().unwrap().value.clone()
    }

    /// Initialize the cell with `initial` if it is still empty.
    ///
    /// A no-op on a non-empty cell. Never notifies: seeding is
    /// initialization, not a change.
    pub fn seed(&self, initial: Value) {
        let mut inner = self.inner.write().unwrap();
        if inner.value.is_none() {
            inner.value = Some(initial);
            tracing::trace!("seeded cell");
        }
    }

    /// Replace the value and notify every listener, unconditionally.
    pub fn write(&self, next: Value) {
        let fan_out = {
            let mut inner = self.inner.write().unwrap();
            inner.value = Some(next);
            tracing::trace!("published cell value");
            inner.listeners.collect()
        };
        for listener in fan_out {
            listener();
        }
    }

    /// Register a change listener; same contract as
    /// [`SlotStore::subscribe`](crate::store::SlotStore::subscribe).
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

    /// Whether two handles refer to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CellStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ExternalStore for CellStore {
    type Snapshot = Option<Value>;

    fn snapshot(&self) -> Option<Value> {
        CellStore::snapshot(self)
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        CellStore::subscribe(self, listener)
    }

    fn snapshot_unchanged(prev: &Option<Value>, next: &Option<Value>) -> bool {
        match (prev, next) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
