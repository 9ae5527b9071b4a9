use std::any::Any;
use std::sync::Arc;

/// A value that can live in a store slot.
///
/// Slots are heterogeneous, so values are stored behind `dyn SlotValue`.
/// The trait adds a dynamic equality probe on top of [`Any`] so the store
/// can compare a candidate write against the current slot contents without
/// knowing the concrete type. Implemented automatically for any
/// `T: Any + PartialEq + Send + Sync`.
pub trait SlotValue: Any + Send + Sync {
    /// The value as `Any`, for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Compare against another slot value.
    ///
    /// Returns `false` when `other` holds a different concrete type.
    fn eq_slot(&self, other: &dyn SlotValue) -> bool;
}

impl<T: Any + PartialEq + Send + Sync> SlotValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_slot(&self, other: &dyn SlotValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A shared, immutable slot value.
pub type Value = Arc<dyn SlotValue>;

/// Wrap a concrete value for storage in a slot.
pub fn value<T: SlotValue>(inner: T) -> Value {
    Arc::new(inner)
}

/// Whether two values are identical: same allocation, or equal payloads.
///
/// This is the store's write gate. Pointer identity covers shared values,
/// the payload comparison covers freshly-allocated scalars that would
/// otherwise always look new.
pub(crate) fn identical(current: &Value, next: &Value) -> bool {
    Arc::ptr_eq(current, next) || current.eq_slot(next.as_ref())
}

/// An immutable snapshot of a store's slot sequence.
///
/// Snapshots are cheap to clone (one `Arc` bump) and are only ever
/// replaced, never mutated in place. Consumers compare snapshots with
/// [`Snapshot::ptr_eq`]: the same reference means nothing changed since
/// the snapshot was taken, a new reference means at least one slot did.
#[derive(Clone)]
pub struct Snapshot {
    values: Arc<Vec<Value>>,
}

impl Snapshot {
    pub(crate) fn empty() -> Self {
        Self {
            values: Arc::new(Vec::new()),
        }
    }

    pub(crate) fn publish(slots: &[Value]) -> Self {
        Self {
            values: Arc::new(slots.to_vec()),
        }
    }

    /// Reference identity: the consumer's re-render signal.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    /// The value at `index`, or `None` for a slot that does not exist yet.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Downcast the value at `index` to its concrete type.
    ///
    /// `None` when the slot is absent or holds a different type.
    pub fn value_of<T: SlotValue + Clone>(&self, index: usize) -> Option<T> {
        self.values
            .get(index)?
            .as_any()
            .downcast_ref::<T>()
            .cloned()
    }

    /// Number of slots captured in this snapshot.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
