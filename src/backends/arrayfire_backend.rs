//! Accelerated array backend on ArrayFire.
//!
//! ArrayFire keeps the active back end (CPU, CUDA, OpenCL) and its random
//! engine in process-wide state and evaluates lazily. The adapter holds the
//! [`ACTIVE_BACKEND`] lease for its whole lifetime and forces every result
//! with `eval` + `sync`.
//!
//! Operands are single precision, the element type `randu` produces by
//! default; host copies are widened to `f64`.

use super::device_selector::{DeviceLease, DeviceSelector};
use super::DenseBackend;
use crate::cases::{Backend, Device, Target};
use crate::errors::{BenchError, BenchResult, ConfigurationError};
use arrayfire as af;
use log::debug;

const LABEL: &str = "ARRAYFIRE";

static ACTIVE_BACKEND: DeviceSelector = DeviceSelector::new(LABEL);

pub struct ArrayFireBackend {
    lease: DeviceLease,
    af_backend: af::Backend,
    seeded: bool,
}

impl ArrayFireBackend {
    /// Leases the global back-end switch and activates `device`
    pub fn open(device: Device) -> BenchResult<Self> {
        let af_backend = match device {
            Device::Cpu => af::Backend::CPU,
            Device::Cuda => af::Backend::CUDA,
            Device::OpenCl => af::Backend::OPENCL,
            other => {
                return Err(ConfigurationError::UnsupportedDevice {
                    backend: LABEL.to_string(),
                    device: other.label().to_string(),
                }
                .into());
            }
        };

        if !af::get_available_backends().contains(&af_backend) {
            return Err(ConfigurationError::DeviceUnavailable {
                backend: LABEL.to_string(),
                device: device.label().to_string(),
                reason: "back end is not installed".to_string(),
            }
            .into());
        }

        let lease = ACTIVE_BACKEND.acquire(device)?;
        let mut backend = Self {
            lease,
            af_backend,
            seeded: false,
        };
        backend.select_device()?;
        Ok(backend)
    }

    fn dims(size: usize) -> af::Dim4 {
        let n = size as u64;
        af::Dim4::new(&[n, n, 1, 1])
    }
}

impl DenseBackend for ArrayFireBackend {
    type Matrix = af::Array<f32>;

    fn target(&self) -> Target {
        Target::new(Backend::ArrayFire, self.lease.device())
    }

    fn select_device(&mut self) -> BenchResult<()> {
        let af_backend = self.af_backend;
        self.lease.activate(|device| {
            debug!("{}: switching active back end to {}", LABEL, device);
            af::set_backend(af_backend);
            Ok(())
        })
    }

    fn seed(&mut self, seed: u64) -> BenchResult<()> {
        af::set_seed(seed);
        self.seeded = true;
        Ok(())
    }

    fn random(&mut self, size: usize) -> BenchResult<Self::Matrix> {
        if !std::mem::take(&mut self.seeded) {
            return Err(ConfigurationError::UnseededRandomState {
                backend: LABEL.to_string(),
            }
            .into());
        }
        let operand = af::randu::<f32>(Self::dims(size));
        self.materialize(&operand)?;
        Ok(operand)
    }

    fn multiply(&self, a: &Self::Matrix, b: &Self::Matrix) -> BenchResult<Self::Matrix> {
        if a.dims()[1] != b.dims()[0] {
            return Err(BenchError::backend(
                LABEL,
                format!("cannot multiply {} by {}", a.dims(), b.dims()),
            ));
        }
        Ok(af::matmul(a, b, af::MatProp::NONE, af::MatProp::NONE))
    }

    fn invert(&self, a: &Self::Matrix) -> BenchResult<Self::Matrix> {
        Ok(af::inverse(a, af::MatProp::NONE))
    }

    fn materialize(&self, matrix: &Self::Matrix) -> BenchResult<()> {
        matrix.eval();
        af::sync(af::get_device());
        Ok(())
    }

    fn to_host(&self, matrix: &Self::Matrix) -> BenchResult<Vec<f64>> {
        // ArrayFire stores column-major
        let row_major = af::transpose(matrix, false);
        let mut buffer = vec![0.0f32; row_major.elements()];
        row_major.host(&mut buffer);
        Ok(buffer.into_iter().map(f64::from).collect())
    }
}
