//! Benchmark case model: operations, targets and the case matrix.

pub mod case_matrix;
pub mod operation;
pub mod target;

pub use case_matrix::{BenchmarkCase, CaseMatrix, SIZE_SWEEP};
pub use operation::Operation;
pub use target::{Backend, Device, Target};
