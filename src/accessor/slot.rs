use std::sync::{Arc, Mutex, OnceLock};

use crate::store::{value, Listener, SlotStore, SlotValue, Subscription};

struct AccessorInner<T> {
    store: SlotStore,
    index: OnceLock<usize>,
    initial: Mutex<Option<T>>,
}

/// A per-call-site binding to one slot of a [`SlotStore`].
///
/// On first use the accessor claims a slot: the claimed index is the
/// store's slot count at that moment, the slot is initialized with the
/// accessor's initial value, and the index is fixed for the accessor's
/// lifetime. Every later read and write goes through that same index;
/// it is never recomputed from the current slot count.
///
/// Slot identity is positional. Creating accessors against the same
/// store in a different order across runs assigns different indices, so
/// a fixed, unconditional claim order is part of the caller's contract.
/// A reimplementation that needs to relax this should address slots by
/// name instead; store-level named identity is already available through
/// [`bootstrap::lookup_or_create`](crate::bootstrap::lookup_or_create).
///
/// Cloning the accessor clones a handle to the same claim.
pub struct SlotAccessor<T> {
    inner: Arc<AccessorInner<T>>,
}

impl<T: SlotValue + Clone> SlotAccessor<T> {
    /// Create an accessor over `store`. The slot is not claimed until
    /// the accessor is first used; `initial` seeds it at that point.
    pub fn new(store: &SlotStore, initial: T) -> Self {
        Self {
            inner: Arc::new(AccessorInner {
                store: store.clone(),
                index: OnceLock::new(),
                initial: Mutex::new(Some(initial)),
            }),
        }
    }

    /// The accessor's slot index, claiming the slot on first use.
    pub fn index(&self) -> usize {
        *self.inner.index.get_or_init(|| {
            let initial = self
                .inner
                .initial
                .lock()
                .unwrap()
                .take()
                .expect("initial value consumed before the claim");
            self.inner.store.claim(value(initial))
        })
    }

    /// The current value, read through the store's latest snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the slot was overwritten with a different type through
    /// the raw store surface. Use [`try_get`](Self::try_get) to observe
    /// that as `None` instead.
    pub fn get(&self) -> T {
        self.try_get()
            .expect("slot no longer holds the accessor's type")
    }

    /// The current value, or `None` when the slot holds a foreign type.
    pub fn try_get(&self) -> Option<T> {
        let index = self.index();
        self.inner.store.snapshot().value_of::<T>(index)
    }

    /// Write `next` into the slot.
    ///
    /// Delegates to [`SlotStore::write`], so writing a value equal to
    /// the current one notifies nobody.
    pub fn set(&self, next: T) {
        let index = self.index();
        self.inner.store.write(index, value(next));
    }

    /// Compute the next value from the current one and write it.
    ///
    /// The current value is read live from the store at call time, not
    /// from any snapshot captured earlier, so chained updates compose.
    ///
    /// # Panics
    ///
    /// Panics if the slot was overwritten with a different type through
    /// the raw store surface, like [`get`](Self::get).
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let index = self.index();
        let current = self
            .inner
            .store
            .value(index)
            .and_then(|current| current.as_any().downcast_ref::<T>().cloned())
            .expect("slot no longer holds the accessor's type");
        self.inner.store.write(index, value(f(&current)));
    }

    /// Subscribe to the underlying store for this accessor's active
    /// duration. Dropping the guard unsubscribes.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.inner.store.subscribe(listener)
    }

    /// The `(value, setter)` shape: the current value plus a handle for
    /// writing back.
    pub fn pair(&self) -> (T, Self) {
        (self.get(), self.clone())
    }
}

impl<T> Clone for SlotAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_is_lazy_and_stable() {
        let store = SlotStore::new();
        let accessor = SlotAccessor::new(&store, 1i32);
        assert_eq!(store.slot_count(), 0);

        assert_eq!(accessor.index(), 0);
        assert_eq!(store.slot_count(), 1);
        // Claims elsewhere do not move an already-claimed index.
        store.claim(value(String::from("other")));
        assert_eq!(accessor.index(), 0);
    }

    #[test]
    fn get_reads_through_the_snapshot() {
        let store = SlotStore::new();
        let accessor = SlotAccessor::new(&store, 5i32);
        assert_eq!(accessor.get(), 5);

        accessor.set(9);
        assert_eq!(accessor.get(), 9);
        assert_eq!(store.snapshot().value_of::<i32>(0), Some(9));
    }

    #[test]
    fn update_sees_the_live_value() {
        let store = SlotStore::new();
        let accessor = SlotAccessor::new(&store, 10i32);
        // Write behind the accessor's back, then update relative to it.
        store.write(accessor.index(), value(20i32));
        accessor.update(|current| current + 1);
        assert_eq!(accessor.get(), 21);
    }

    #[test]
    fn try_get_is_none_for_a_foreign_type() {
        let store = SlotStore::new();
        let accessor = SlotAccessor::new(&store, 1i32);
        let index = accessor.index();
        store.write(index, value(String::from("oops")));
        assert_eq!(accessor.try_get(), None);
    }

    #[test]
    fn clones_share_the_claim() {
        let store = SlotStore::new();
        let accessor = SlotAccessor::new(&store, 0i32);
        let setter = accessor.clone();
        setter.set(3);
        assert_eq!(accessor.index(), setter.index());
        assert_eq!(accessor.get(), 3);
        assert_eq!(store.slot_count(), 1);
    }
}
