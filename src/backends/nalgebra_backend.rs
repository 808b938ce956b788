//! General-purpose CPU dense-algebra backend on `nalgebra`.

use super::DenseBackend;
use crate::cases::{Backend, Target};
use crate::errors::{BenchError, BenchResult, ConfigurationError};
use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LABEL: &str = "NALGEBRA";

/// Host-only backend with operands uniform in `[-1, 1)`
///
/// nalgebra has no random facility of its own, so draws come from a
/// `ChaCha8Rng` owned by the adapter. The stream is consumed by each draw and
/// has to be re-seeded before the next one.
#[derive(Debug, Default)]
pub struct NalgebraBackend {
    rng: Option<ChaCha8Rng>,
}

impl NalgebraBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DenseBackend for NalgebraBackend {
    type Matrix = DMatrix<f64>;

    fn target(&self) -> Target {
        Target::host(Backend::Nalgebra)
    }

    fn select_device(&mut self) -> BenchResult<()> {
        Ok(())
    }

    fn seed(&mut self, seed: u64) -> BenchResult<()> {
        self.rng = Some(ChaCha8Rng::seed_from_u64(seed));
        Ok(())
    }

    fn random(&mut self, size: usize) -> BenchResult<Self::Matrix> {
        let mut rng = self
            .rng
            .take()
            .ok_or_else(|| ConfigurationError::UnseededRandomState {
                backend: LABEL.to_string(),
            })?;
        Ok(DMatrix::from_fn(size, size, |_, _| {
            rng.random_range(-1.0..1.0)
        }))
    }

    fn multiply(&self, a: &Self::Matrix, b: &Self::Matrix) -> BenchResult<Self::Matrix> {
        if a.ncols() != b.nrows() {
            return Err(BenchError::backend(
                LABEL,
                format!(
                    "cannot multiply {}x{} by {}x{}",
                    a.nrows(),
                    a.ncols(),
                    b.nrows(),
                    b.ncols()
                ),
            ));
        }
        Ok(a * b)
    }

    fn invert(&self, a: &Self::Matrix) -> BenchResult<Self::Matrix> {
        if !a.is_square() {
            return Err(BenchError::backend(
                LABEL,
                format!("cannot invert a {}x{} matrix", a.nrows(), a.ncols()),
            ));
        }
        a.clone()
            .try_inverse()
            .ok_or_else(|| BenchError::backend(LABEL, "matrix is singular"))
    }

    fn materialize(&self, _matrix: &Self::Matrix) -> BenchResult<()> {
        Ok(())
    }

    fn to_host(&self, matrix: &Self::Matrix) -> BenchResult<Vec<f64>> {
        // nalgebra stores column-major
        Ok(matrix.transpose().as_slice().to_vec())
    }
}
