//! Benchmarks the chained multiplication of 6 random square matrices of increasing size
//!
//! Run with: cargo bench --bench dense_chained_multiplication

use criterion::{criterion_group, criterion_main, Criterion};
use dense_bench::harness::bench_operation;
use dense_bench::Operation;

fn dense_chained_multiplication(c: &mut Criterion) {
    bench_operation(c, Operation::ChainMultiply);
}

criterion_group!(benches, dense_chained_multiplication);
criterion_main!(benches);
