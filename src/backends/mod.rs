//! Numeric library adapters.
//!
//! Every backend is wrapped behind [`DenseBackend`], a uniform "construct
//! operands, run operation, produce result" surface. The driver never looks at
//! which library it is talking to; [`prepare_case`] is the only place that maps
//! a [`Backend`] to its adapter.

pub mod device_selector;
pub mod nalgebra_backend;

#[cfg(feature = "arrayfire")]
pub mod arrayfire_backend;
#[cfg(feature = "torch")]
pub mod torch_backend;

pub use device_selector::{DeviceLease, DeviceSelector};
pub use nalgebra_backend::NalgebraBackend;

#[cfg(feature = "arrayfire")]
pub use arrayfire_backend::ArrayFireBackend;
#[cfg(feature = "torch")]
pub use torch_backend::TorchBackend;

use crate::cases::{Backend, BenchmarkCase, Operation, Target};
use crate::driver::{self, PreparedCase};
use crate::errors::{BenchError, BenchResult, ConfigurationError};
use serde::{Deserialize, Serialize};

/// Capability set every numeric library adapter provides
///
/// Results handed out by [`execute`] are always materialized: lazy backends
/// must finish the computation in [`DenseBackend::materialize`].
pub trait DenseBackend {
    type Matrix;

    fn target(&self) -> Target;

    /// Makes this adapter's device the active compute target
    ///
    /// Called immediately before operand generation and again right before
    /// measurement. Per-tensor-device libraries have nothing to switch.
    fn select_device(&mut self) -> BenchResult<()>;

    /// Resets the random state so the next draw starts from `seed`
    fn seed(&mut self, seed: u64) -> BenchResult<()>;

    /// Draws a `size × size` operand from the seeded stream
    ///
    /// A draw without a preceding [`DenseBackend::seed`] is a
    /// [`ConfigurationError::UnseededRandomState`].
    fn random(&mut self, size: usize) -> BenchResult<Self::Matrix>;

    fn multiply(&self, a: &Self::Matrix, b: &Self::Matrix) -> BenchResult<Self::Matrix>;

    /// Fully left-associated product `(((a·b)·c)·…)`
    fn chain_multiply(&self, operands: &[Self::Matrix]) -> BenchResult<Self::Matrix> {
        match operands {
            [first, second, rest @ ..] => {
                let mut product = self.multiply(first, second)?;
                for operand in rest {
                    product = self.multiply(&product, operand)?;
                }
                Ok(product)
            }
            _ => Err(BenchError::backend(
                self.target().label(),
                format!(
                    "chained multiplication needs at least 2 operands, got {}",
                    operands.len()
                ),
            )),
        }
    }

    fn invert(&self, a: &Self::Matrix) -> BenchResult<Self::Matrix>;

    /// Blocks until `matrix` is fully computed
    fn materialize(&self, matrix: &Self::Matrix) -> BenchResult<()>;

    /// Row-major host copy of `matrix`
    fn to_host(&self, matrix: &Self::Matrix) -> BenchResult<Vec<f64>>;
}

/// Runs `operation` on `operands` and materializes the result
pub fn execute<B: DenseBackend + ?Sized>(
    backend: &B,
    operation: Operation,
    operands: &[B::Matrix],
) -> BenchResult<B::Matrix> {
    if operands.len() != operation.operand_count() {
        return Err(BenchError::backend(
            backend.target().label(),
            format!(
                "{} expects {} operands, got {}",
                operation.code(),
                operation.operand_count(),
                operands.len()
            ),
        ));
    }

    let result = match operation {
        Operation::Multiply => backend.multiply(&operands[0], &operands[1]),
        Operation::ChainMultiply => backend.chain_multiply(operands),
        Operation::Invert => backend.invert(&operands[0]),
    }?;

    backend.materialize(&result)?;
    Ok(result)
}

/// Per-backend construction options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendOptions {
    /// Create TORCH operands with gradient tracking enabled
    pub torch_requires_grad: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            torch_requires_grad: true,
        }
    }
}

/// Opens the adapter for `case`, selects its device and generates its operands
pub fn prepare_case(
    case: &BenchmarkCase,
    options: &BackendOptions,
) -> BenchResult<Box<dyn PreparedCase>> {
    case.target.check_device()?;

    match case.target.backend {
        Backend::Nalgebra => driver::prepare(NalgebraBackend::new(), case),
        Backend::Torch => prepare_torch(case, options),
        Backend::ArrayFire => prepare_arrayfire(case),
    }
}

fn required_device(case: &BenchmarkCase) -> Result<crate::cases::Device, ConfigurationError> {
    case.target
        .device
        .ok_or_else(|| ConfigurationError::UnsupportedDevice {
            backend: case.target.backend.label().to_string(),
            device: "<none>".to_string(),
        })
}

#[cfg(feature = "torch")]
fn prepare_torch(
    case: &BenchmarkCase,
    options: &BackendOptions,
) -> BenchResult<Box<dyn PreparedCase>> {
    let device = required_device(case)?;
    driver::prepare(
        TorchBackend::open(device, options.torch_requires_grad)?,
        case,
    )
}

#[cfg(not(feature = "torch"))]
fn prepare_torch(
    case: &BenchmarkCase,
    _options: &BackendOptions,
) -> BenchResult<Box<dyn PreparedCase>> {
    required_device(case)?;
    Err(not_compiled(Backend::Torch))
}

#[cfg(feature = "arrayfire")]
fn prepare_arrayfire(case: &BenchmarkCase) -> BenchResult<Box<dyn PreparedCase>> {
    let device = required_device(case)?;
    driver::prepare(ArrayFireBackend::open(device)?, case)
}

#[cfg(not(feature = "arrayfire"))]
fn prepare_arrayfire(case: &BenchmarkCase) -> BenchResult<Box<dyn PreparedCase>> {
    required_device(case)?;
    Err(not_compiled(Backend::ArrayFire))
}

#[cfg(any(not(feature = "torch"), not(feature = "arrayfire")))]
fn not_compiled(backend: Backend) -> BenchError {
    ConfigurationError::BackendNotCompiled {
        backend: backend.label().to_string(),
        feature: backend.feature().unwrap_or_default().to_string(),
    }
    .into()
}
