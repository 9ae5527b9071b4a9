//! Process-wide store bootstrap.
//!
//! Stores are process-lifetime singletons addressed by fixed string
//! keys. Lookup is create-on-first-use and never resets an existing
//! entry, which is what lets state survive reinitialization of the
//! module holding the handles.

mod global;

pub use global::{
    global_cell, global_slots, lookup_or_create, lookup_or_create_cell, GLOBAL_CELL_KEY,
    GLOBAL_KEY,
};
