//! Reload-survival demo: two "module lifetimes" sharing one keyed store

use pegboard::{bootstrap, SlotAccessor};

const KEY: &str = "demo-shared-state";

fn module_lifetime_one() {
    println!("1. First module lifetime: bootstrap and write");
    let store = bootstrap::lookup_or_create(KEY);
    let visits = SlotAccessor::new(&store, 0u32);
    visits.update(|prev| prev + 1);
    println!("   visits = {}", visits.get());
    // All handles drop here; the registry keeps the store alive.
}

fn module_lifetime_two() {
    println!("\n2. Second module lifetime: the same key recovers the state");
    let store = bootstrap::lookup_or_create(KEY);
    println!("   recovered {} slot(s)", store.slot_count());
    println!(
        "   visits = {:?}",
        store.snapshot().value_of::<u32>(0)
    );
}

fn main() {
    println!("=== Reload Survival ===\n");
    module_lifetime_one();
    module_lifetime_two();
}
