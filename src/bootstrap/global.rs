use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::store::{CellStore, SlotStore};

/// Well-known key of the process-wide default [`SlotStore`].
pub const GLOBAL_KEY: &str = "__PEGBOARD__";

/// Well-known key of the process-wide default [`CellStore`].
pub const GLOBAL_CELL_KEY: &str = "__PEGBOARD_CELL__";

fn slot_registry() -> &'static Mutex<HashMap<String, SlotStore>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, SlotStore>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

fn cell_registry() -> &'static Mutex<HashMap<String, CellStore>> {
    static REGISTRY: OnceLock<Mutex<HashMap<String, CellStore>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Look up the [`SlotStore`] bound to `key`, creating it on first use.
///
/// The registry outlives any module-level handle and entries are never
/// removed, so a module that is torn down and reinitialized (hot reload)
/// gets its existing store back, slots and listeners intact, instead of
/// an empty one.
pub fn lookup_or_create(key: &str) -> SlotStore {
    let mut registry = slot_registry().lock().unwrap();
    registry
        .entry(key.to_owned())
        .or_insert_with(|| {
            tracing::trace!(key, "created slot store");
            SlotStore::new()
        })
        .clone()
}

/// Look up the [`CellStore`] bound to `key`, creating it on first use.
pub fn lookup_or_create_cell(key: &str) -> CellStore {
    let mut registry = cell_registry().lock().unwrap();
    registry
        .entry(key.to_owned())
        .or_insert_with(|| {
            tracing::trace!(key, "created cell store");
            CellStore::new()
        })
        .clone()
}

/// The process-wide default [`SlotStore`], under [`GLOBAL_KEY`].
pub fn global_slots() -> SlotStore {
    lookup_or_create(GLOBAL_KEY)
}

/// The process-wide default [`CellStore`], under [`GLOBAL_CELL_KEY`].
pub fn global_cell() -> CellStore {
    lookup_or_create_cell(GLOBAL_CELL_KEY)
}
