use std::collections::HashMap;
use std::sync::Arc;

/// A zero-argument change callback.
///
/// Listeners are compared by allocation: subscribing the same `Listener`
/// (the same `Arc`) twice stores it once, and removing it is idempotent.
/// Two separately-wrapped closures are distinct listeners even if their
/// bodies are identical.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The set of registered listeners.
///
/// Entries are keyed by a generation id from a counter that never
/// repeats, so a removal key stays valid forever: a stale key is a
/// no-op even when a later listener allocation reuses the same address.
/// A side map from allocation address to id detects duplicates; while
/// an entry is registered the set holds its `Arc`, so a registered
/// address can never be reused by a different listener.
pub(crate) struct ListenerSet {
    entries: HashMap<u64, Listener>,
    by_addr: HashMap<usize, u64>,
    next_id: u64,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            by_addr: HashMap::new(),
            next_id: 0,
        }
    }

    fn addr(listener: &Listener) -> usize {
        Arc::as_ptr(listener) as *const () as usize
    }

    /// Insert a listener, returning its removal key.
    ///
    /// Re-inserting the same `Arc` returns the existing entry's key:
    /// the set never holds duplicates.
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let addr = Self::addr(&listener);
        if let Some(&id) = self.by_addr.get(&addr) {
            if self
                .entries
                .get(&id)
                .is_some_and(|existing| Arc::ptr_eq(existing, &listener))
            {
                return id;
            }
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, listener);
        self.by_addr.insert(addr, id);
        id
    }

    /// Remove by key. A no-op when the key is absent or stale.
    pub(crate) fn remove(&mut self, key: u64) {
        if let Some(listener) = self.entries.remove(&key) {
            let addr = Self::addr(&listener);
            if self.by_addr.get(&addr) == Some(&key) {
                self.by_addr.remove(&addr);
            }
        }
    }

    /// Copy out the current listeners for fan-out.
    ///
    /// Notification iterates this copy outside the store lock, so
    /// listeners registered or removed during a fan-out never cause
    /// skipped or duplicate calls within that fan-out, and re-entrant
    /// writes do not deadlock.
    pub(crate) fn collect(&self) -> Vec<Listener> {
        self.entries.values().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Guard for a registered listener.
///
/// Dropping the guard (or calling [`Subscription::unsubscribe`]) removes
/// exactly the listener it was created for. [`Subscription::detach`]
/// keeps the listener registered for the store's lifetime instead.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new<F>(remove: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Keep the listener registered after the guard is gone.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}
