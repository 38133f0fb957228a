//! Benchmarks for the pruned tree builder.
//!
//! Measures the three phases together (grow + abelian cleanup + cascade) at
//! depths where the stock forbidden list starts pruning aggressively, and
//! the growth phase alone as a baseline.

use avoidance::builder::grow;
use avoidance::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn stock_forbidden() -> ForbiddenSet {
    ForbiddenSet::close(&default_base())
}

fn config(max_len: usize) -> BuildConfig {
    BuildConfig {
        first: "A".parse().unwrap(),
        second: "B".parse().unwrap(),
        max_len,
    }
}

/// Growth phase only, stock forbidden set, depth 10.
fn bench_grow_depth10(c: &mut Criterion) {
    let forbidden = stock_forbidden();
    let cfg = config(10);

    c.bench_function("grow_stock_depth10", |b| {
        b.iter(|| grow(black_box(&cfg), black_box(&forbidden)).unwrap())
    });
}

/// Full pipeline, stock forbidden set, depth 10.
fn bench_build_depth10(c: &mut Criterion) {
    let forbidden = stock_forbidden();
    let cfg = config(10);

    c.bench_function("build_stock_depth10", |b| {
        b.iter(|| build(black_box(&cfg), black_box(&forbidden)).unwrap())
    });
}

/// Full pipeline with a single short base pattern, depth 12: lots of
/// survivors, so the cleanup passes dominate.
fn bench_build_sparse_filter(c: &mut Criterion) {
    let forbidden = ForbiddenSet::close(&["AAAA".parse().unwrap()]);
    let cfg = config(12);

    c.bench_function("build_aaaa_depth12", |b| {
        b.iter(|| build(black_box(&cfg), black_box(&forbidden)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_grow_depth10,
    bench_build_depth10,
    bench_build_sparse_filter
);
criterion_main!(benches);
