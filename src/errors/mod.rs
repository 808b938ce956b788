//! Error types for the benchmark harness.
//!
//! Configuration problems are kept in their own enum so callers can tell a
//! case that never started apart from one whose backend failed mid-run.

mod bench_error;
mod configuration_error;

pub use bench_error::BenchError;
pub use configuration_error::ConfigurationError;

/// Result type alias for benchmark operations
pub type BenchResult<T> = std::result::Result<T, BenchError>;
