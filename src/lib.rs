//! Cross-backend micro-benchmarks for dense linear-algebra kernels.
//!
//! Times dense matrix multiplication, chained multiplication of six matrices
//! and matrix inversion on several numeric libraries over a fixed sweep of
//! square sizes. Inputs are drawn from freshly seeded streams so every run
//! and every backend sees reproducible operands; results are forced to
//! materialize and pass through a `black_box` barrier so the timings measure
//! real computation.

pub mod backends;
pub mod cases;
pub mod config;
pub mod driver;
pub mod errors;
pub mod harness;
pub mod input_generator;
pub mod report;

pub use backends::{BackendOptions, DenseBackend, NalgebraBackend};
pub use cases::{Backend, BenchmarkCase, CaseMatrix, Device, Operation, Target, SIZE_SWEEP};
pub use config::{BenchConfig, ConfigLoader};
pub use driver::{CaseOutcome, CaseStatus, TimedLoopDriver};
pub use errors::{BenchError, BenchResult, ConfigurationError};
pub use harness::{CaseRoutine, Harness, Timing, WallClockConfig, WallClockHarness};
pub use report::RunReport;
