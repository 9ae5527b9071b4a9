//! # Pegboard
//!
//! A minimal process-wide external-state container for hosts that
//! follow a "subscribe for notification, read a reference-comparable
//! snapshot, re-render on change" contract.
//!
//! ## Stores (authoritative state)
//!
//! Two variants hold the state and broadcast change events:
//! - [`SlotStore`] - an ordered sequence of slots claimed in call
//!   order, with equality-gated notification: writing an identical
//!   value publishes nothing and notifies nobody
//! - [`CellStore`] - a single value with unconditional notification on
//!   every write
//!
//! Both implement [`ExternalStore`], the fixed subscription interface a
//! host framework consumes: `subscribe` plus an O(1) `snapshot` whose
//! reference identity is the re-render signal.
//!
//! ## Accessors (per-call-site bindings)
//!
//! - [`SlotAccessor`] - claims one slot on first use and exposes a
//!   read/write pair over it
//! - [`CellAccessor`] - the same surface over the single-value variant
//!
//! ## Bootstrap
//!
//! [`global_slots`] and [`global_cell`] resolve the process-wide
//! default stores through a keyed registry that survives module
//! reinitialization; [`bootstrap::lookup_or_create`] does the same for
//! caller-chosen keys.

pub mod accessor;
pub mod bootstrap;
pub mod store;

// Re-export main types for convenience
pub use accessor::{CellAccessor, SlotAccessor};
pub use bootstrap::{global_cell, global_slots, GLOBAL_CELL_KEY, GLOBAL_KEY};
pub use store::{
    listener, value, CellStore, ExternalStore, Listener, SlotStore, SlotValue, Snapshot,
    Subscription, Value,
};
