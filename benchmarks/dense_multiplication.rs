//! Benchmarks the multiplication of 2 random square matrices of increasing size
//!
//! Run with: cargo bench --bench dense_multiplication

use criterion::{criterion_group, criterion_main, Criterion};
use dense_bench::harness::bench_operation;
use dense_bench::Operation;

fn dense_multiplication(c: &mut Criterion) {
    bench_operation(c, Operation::Multiply);
}

criterion_group!(benches, dense_multiplication);
criterion_main!(benches);
