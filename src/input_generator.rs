//! Deterministic operand construction.
//!
//! Operand `k` of a case is always drawn from a stream freshly seeded with
//! `k`, so inputs are reproducible across runs and independent of whatever a
//! previous case left in the backend's random state.

use crate::backends::DenseBackend;
use crate::cases::Operation;
use crate::errors::{BenchResult, ConfigurationError};
use log::debug;

/// Seed used for the operand at `operand_index`
pub const fn seed_for(operand_index: usize) -> u64 {
    operand_index as u64
}

/// Draws one `size × size` operand
pub fn generate_operand<B: DenseBackend + ?Sized>(
    backend: &mut B,
    size: usize,
    operand_index: usize,
) -> BenchResult<B::Matrix> {
    if size == 0 {
        return Err(ConfigurationError::InvalidSize { size }.into());
    }

    let seed = seed_for(operand_index);
    backend.seed(seed)?;
    let operand = backend.random(size)?;
    debug!(
        "{}: drew operand {} ({}x{}) with seed {}",
        backend.target(),
        operand_index,
        size,
        size,
        seed
    );
    Ok(operand)
}

/// Draws every operand of `operation`, in operand-index order
pub fn generate_operands<B: DenseBackend + ?Sized>(
    backend: &mut B,
    operation: Operation,
    size: usize,
) -> BenchResult<Vec<B::Matrix>> {
    (0..operation.operand_count())
        .map(|index| generate_operand(backend, size, index))
        .collect()
}
