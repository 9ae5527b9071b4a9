use std::sync::{Arc, Mutex, OnceLock};

use crate::store::{value, CellStore, Listener, SlotValue, Subscription};

struct AccessorInner<T> {
    store: CellStore,
    seeded: OnceLock<()>,
    initial: Mutex<Option<T>>,
}

/// A binding to the single value of a [`CellStore`].
///
/// First use seeds the cell with the accessor's initial value when the
/// cell is still empty; a cell that already holds a value (for example
/// after a module reload) keeps it. There is no index to claim.
///
/// Writes inherit the cell's unconditional semantics: every `set` or
/// `update` notifies all listeners, identical value or not.
pub struct CellAccessor<T> {
    inner: Arc<AccessorInner<T>>,
}

impl<T: SlotValue + Clone> CellAccessor<T> {
    /// Create an accessor over `store`; `initial` seeds the cell on
    /// first use if it is still empty.
    pub fn new(store: &CellStore, initial: T) -> Self {
        Self {
            inner: Arc::new(AccessorInner {
                store: store.clone(),
                seeded: OnceLock::new(),
                initial: Mutex::new(Some(initial)),
            }),
        }
    }

    fn ensure_seeded(&self) {
        self.inner.seeded.get_or_init(|| {
            if let Some(initial) = self.inner.initial.lock().unwrap().take() {
                self.inner.store.seed(value(initial));
            }
        });
    }

    /// The current value.
    ///
    /// # Panics
    ///
    /// Panics if the cell holds a different type. Use
    /// [`try_get`](Self::try_get) to observe that as `None` instead.
    pub fn get(&self) -> T {
        self.try_get().expect("cell does not hold the accessor's type")
    }

    /// The current value, or `None` when the cell is empty or holds a
    /// foreign type.
    pub fn try_get(&self) -> Option<T> {
        self.ensure_seeded();
        self.inner
            .store
            .snapshot()?
            .as_any()
            .downcast_ref::<T>()
            .cloned()
    }

    /// Replace the value. Always notifies.
    pub fn set(&self, next: T) {
        self.ensure_seeded();
        self.inner.store.write(value(next));
    }

    /// Compute the next value from the current one and write it.
    ///
    /// # Panics
    ///
    /// Panics if the cell holds a different type, like
    /// [`get`](Self::get).
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let current = self
            .try_get()
            .expect("cell does not hold the accessor's type");
        self.inner.store.write(value(f(&current)));
    }

    /// Subscribe to the underlying cell for this accessor's active
    /// duration. Dropping the guard unsubscribes.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.inner.store.subscribe(listener)
    }

    /// The `(value, setter)` shape.
    pub fn pair(&self) -> (T, Self) {
        (self.get(), self.clone())
    }
}

impl<T> Clone for CellAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
