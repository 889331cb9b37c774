//! Criterion benchmarks for the indexed heap.
//! Focus sizes: n in {1k, 10k, 100k}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use marcher::heap::{HeapKind, IndexedHeap};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_keys(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_heap");
    for &n in &[1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("add_then_drain", n), &n, |b, &n| {
            b.iter_batched(
                || random_keys(n, 41),
                |keys| {
                    let mut h = IndexedHeap::new(n, HeapKind::Min);
                    for id in 0..n {
                        h.add(id, keys.as_slice());
                    }
                    while h.poll(keys.as_slice()).is_some() {}
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("set_all", n), &n, |b, &n| {
            let keys = random_keys(n, 42);
            let mut h = IndexedHeap::new(n, HeapKind::Max);
            b.iter(|| h.set_all(keys.as_slice()));
        });

        group.bench_with_input(BenchmarkId::new("decrease_key", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let keys = random_keys(n, 43);
                    let mut h = IndexedHeap::new(n, HeapKind::Min);
                    h.set_all(keys.as_slice());
                    (keys, h, StdRng::seed_from_u64(44))
                },
                |(mut keys, mut h, mut rng)| {
                    for _ in 0..n / 10 {
                        let id = rng.gen_range(0..n);
                        keys[id] *= 0.5;
                        h.update(id, keys.as_slice());
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_heap);
criterion_main!(benches);
