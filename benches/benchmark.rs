use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_ring::{AvlTree, Ring};

const N: usize = 100_000;
const RING_N: usize = 1_000;

pub fn tree_benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        let mut tree = AvlTree::new();
        b.iter(|| {
            for value in &values {
                tree.insert(*value, *value);
            }
        })
    });

    let mut tree = AvlTree::new();
    for value in &values {
        tree.insert(*value, *value);
    }

    c.bench_function("tree_get", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.get(value));
            }
        })
    });

    c.bench_function("tree_iter", |b| {
        b.iter(|| {
            for (k, v) in &tree {
                black_box((k, v));
            }
        })
    });

    c.bench_function("tree_top_k", |b| b.iter(|| black_box(tree.top_k(10))));

    c.bench_function("tree_remove", |b| {
        let mut tree = tree.clone();
        b.iter(|| {
            for value in &values {
                tree.remove(value);
            }
        })
    });
}

pub fn ring_benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=RING_N).map(|_| rng.gen()).collect();

    c.bench_function("ring_push_pop", |b| {
        let mut ring = Ring::new();
        b.iter(|| {
            for value in &values {
                ring.push_back(*value, *value);
            }
            while let Some(entry) = ring.pop_front() {
                black_box(entry);
            }
        })
    });

    let ring: Ring<i32, i32> = values.iter().map(|value| (*value, *value)).collect();
    c.bench_function("ring_sort_by_info", |b| {
        b.iter(|| {
            let mut ring = ring.clone();
            black_box(ring.sort_by_info())
        })
    });
}

criterion_group!(benches, tree_benchmarks, ring_benchmarks);
criterion_main!(benches);
