//! Counter application demonstrating slot accessors and the re-render loop

use pegboard::{listener, ExternalStore, SlotAccessor, SlotStore};

fn main() {
    println!("=== Counter Application ===\n");

    println!("1. Claiming two slots");
    let store = SlotStore::new();
    let count = SlotAccessor::new(&store, 0i32);
    let label = SlotAccessor::new(&store, String::from("clicks"));
    println!("   count  -> slot {}", count.index());
    println!("   label  -> slot {}", label.index());

    println!("\n2. Subscribing a change listener");
    let _sub = store.subscribe(listener(|| {
        println!("   [notify] state changed");
    }));

    println!("\n3. Writing through the setters");
    let mut last_rendered = store.snapshot();
    for _ in 0..3 {
        count.update(|prev| prev + 1);

        let next = store.snapshot();
        if !SlotStore::snapshot_unchanged(&last_rendered, &next) {
            println!("   [render] {} {}", count.get(), label.get());
            last_rendered = next;
        }
    }

    println!("\n4. Writing an identical value (gated, no notify, no render)");
    count.set(count.get());
    let next = store.snapshot();
    println!(
        "   snapshot unchanged: {}",
        SlotStore::snapshot_unchanged(&last_rendered, &next)
    );

    println!("\nFinal state: {} {}", count.get(), label.get());
}
