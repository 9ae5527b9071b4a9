//! Per-call-site accessors over the store variants.
//!
//! An accessor bridges one call site to its state: it claims storage on
//! first use, reads through the store's published snapshot, and exposes
//! setters that delegate to the store's write path.

mod cell;
mod slot;

pub use cell::CellAccessor;
pub use slot::SlotAccessor;
