//! Process-wide state stores and the subscription contract.
//!
//! Two store variants hold the authoritative state:
//! - [`SlotStore`]: an ordered sequence of slots claimed in call order,
//!   with equality-gated notification.
//! - [`CellStore`]: a single value with unconditional notification.
//!
//! Both publish reference-comparable snapshots and notify registered
//! listeners synchronously on every effective write, which is all a host
//! framework needs to decide when to re-render.

mod cell;
mod listeners;
mod slotted;
mod value;

pub use cell::CellStore;
pub use listeners::{listener, Listener, Subscription};
pub use slotted::SlotStore;
pub use value::{value, SlotValue, Snapshot, Value};

/// The subscription contract a host framework consumes.
///
/// The host registers a listener to learn that *something* may have
/// changed, then reads a snapshot and compares it by reference against
/// the one it last rendered from: an unchanged reference means skip the
/// re-render, a new reference means state changed. Implementations must
/// keep the two sides agreeing: never notify without publishing a new
/// snapshot reference for changed data, and never publish a new
/// reference when nothing changed.
pub trait ExternalStore {
    /// The reference-comparable snapshot the host renders from.
    type Snapshot: Clone;

    /// The most recently published snapshot. O(1), allocation-free.
    fn snapshot(&self) -> Self::Snapshot;

    /// Register `listener` until the returned guard removes it. The
    /// listener is never invoked synchronously from `subscribe` itself.
    fn subscribe(&self, listener: Listener) -> Subscription;

    /// Reference identity of two snapshots: `true` means nothing
    /// changed between them and a re-render can be skipped.
    fn snapshot_unchanged(prev: &Self::Snapshot, next: &Self::Snapshot) -> bool;
}
