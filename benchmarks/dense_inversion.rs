//! Benchmarks the inversion of 1 random square matrix of increasing size
//!
//! Run with: cargo bench --bench dense_inversion

use criterion::{criterion_group, criterion_main, Criterion};
use dense_bench::harness::bench_operation;
use dense_bench::Operation;

fn dense_inversion(c: &mut Criterion) {
    bench_operation(c, Operation::Invert);
}

criterion_group!(benches, dense_inversion);
criterion_main!(benches);
