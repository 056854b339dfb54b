//! Criterion benchmarks for construction, queries and median selection.
//!
//! Run with:
//! ```bash
//! cargo bench
//! ```
//! The `select` group compares sorting against median-of-medians; its
//! crossover is the value to use for `sort_threshold`.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vantage::median::HybridSelector;
use vantage::{linear_scan, Point, VPTreeBuilder};

fn random_points(rng: &mut StdRng, n: usize, dim: usize) -> Vec<Point<f32>> {
    (0..n).map(|_| Point::new((0..dim).map(|_| rng.gen_range(0.0..1.0)).collect())).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("vptree/build");
    let mut rng = StdRng::seed_from_u64(1);
    for &n in &[1_000usize, 10_000, 50_000] {
        let points = random_points(&mut rng, n, 8);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| VPTreeBuilder::new().seed(1).build(points.clone()).unwrap());
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("vptree/query");
    let mut rng = StdRng::seed_from_u64(2);
    for &n in &[1_000usize, 10_000, 50_000] {
        let points = random_points(&mut rng, n, 4);
        let tree = VPTreeBuilder::new().seed(2).build(points.clone()).unwrap();
        let targets = random_points(&mut rng, 64, 4);

        group.bench_with_input(BenchmarkId::new("tree", n), &targets, |b, targets| {
            b.iter(|| {
                for t in targets {
                    black_box(tree.nearest_neighbor(t).unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("linear_scan", n), &targets, |b, targets| {
            b.iter(|| {
                for t in targets {
                    black_box(linear_scan(&points, t).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("median/select");
    let mut rng = StdRng::seed_from_u64(3);
    let sorting = HybridSelector::new(usize::MAX);
    let selecting = HybridSelector::new(0);
    for &n in &[1_000usize, 16_384, 200_000] {
        let v: Vec<f32> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
        group.bench_with_input(BenchmarkId::new("sort", n), &v, |b, v| {
            b.iter(|| sorting.select_median(v.clone()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("median_of_medians", n), &v, |b, v| {
            b.iter(|| selecting.select_median(v.clone()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_select);
criterion_main!(benches);
