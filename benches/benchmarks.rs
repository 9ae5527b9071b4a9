use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;

use pegboard::{listener, value, SlotAccessor, SlotStore};

fn snapshot_read_benchmark(c: &mut Criterion) {
    let store = SlotStore::new();
    for i in 0..16i64 {
        store.claim(value(i));
    }

    c.bench_function("snapshot_read", |b| {
        b.iter(|| {
            black_box(store.snapshot());
        });
    });
}

fn gated_write_benchmark(c: &mut Criterion) {
    let store = SlotStore::new();
    let index = store.claim(value(0i64));
    store.write(index, value(42i64));

    // Identical value every iteration: the gate short-circuits before
    // any snapshot is built.
    c.bench_function("gated_write", |b| {
        b.iter(|| {
            store.write(black_box(index), value(42i64));
        });
    });
}

fn effective_write_benchmark(c: &mut Criterion) {
    let store = SlotStore::new();
    let index = store.claim(value(0i64));

    c.bench_function("effective_write", |b| {
        let mut i = 0i64;
        b.iter(|| {
            store.write(index, value(black_box(i)));
            i += 1;
        });
    });
}

fn claim_benchmark(c: &mut Criterion) {
    c.bench_function("claim", |b| {
        b.iter_batched(
            SlotStore::new,
            |store| {
                black_box(store.claim(value(1i64)));
                store
            },
            BatchSize::SmallInput,
        );
    });
}

fn accessor_update_benchmark(c: &mut Criterion) {
    let store = SlotStore::new();
    let accessor = SlotAccessor::new(&store, 0i64);
    accessor.index();

    c.bench_function("accessor_update", |b| {
        b.iter(|| {
            accessor.update(|prev| prev + 1);
        });
    });
}

fn fan_out_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    for listeners in [1usize, 8, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(listeners),
            &listeners,
            |b, &listeners| {
                let store = SlotStore::new();
                let index = store.claim(value(0i64));
                let subs: Vec<_> = (0..listeners)
                    .map(|_| store.subscribe(listener(|| {})))
                    .collect();

                let mut i = 0i64;
                b.iter(|| {
                    store.write(index, value(black_box(i)));
                    i += 1;
                });
                drop(subs);
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    snapshot_read_benchmark,
    gated_write_benchmark,
    effective_write_benchmark,
    claim_benchmark,
    accessor_update_benchmark,
    fan_out_benchmark
);
criterion_main!(benches);
