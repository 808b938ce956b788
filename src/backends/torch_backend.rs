//! Tensor-library backend on libtorch (`tch`).
//!
//! libtorch has no global device switch: the device is a construction option
//! of every tensor, so [`DenseBackend::select_device`] is a no-op and the
//! device is applied when operands are drawn.

use super::DenseBackend;
use crate::cases::{Backend, Device, Target};
use crate::errors::{BenchError, BenchResult, ConfigurationError};
use tch::{Kind, Tensor};

const LABEL: &str = "TORCH";

pub struct TorchBackend {
    device: Device,
    tch_device: tch::Device,
    requires_grad: bool,
    seeded: bool,
}

impl TorchBackend {
    /// Resolves `device` to a libtorch device, failing if it is not present
    pub fn open(device: Device, requires_grad: bool) -> BenchResult<Self> {
        let tch_device = match device {
            Device::Cpu => tch::Device::Cpu,
            Device::Gpu => {
                if !tch::Cuda::is_available() {
                    return Err(ConfigurationError::DeviceUnavailable {
                        backend: LABEL.to_string(),
                        device: device.label().to_string(),
                        reason: "libtorch reports no CUDA device".to_string(),
                    }
                    .into());
                }
                tch::Device::Cuda(0)
            }
            other => {
                return Err(ConfigurationError::UnsupportedDevice {
                    backend: LABEL.to_string(),
                    device: other.label().to_string(),
                }
                .into());
            }
        };

        Ok(Self {
            device,
            tch_device,
            requires_grad,
            seeded: false,
        })
    }
}

fn torch_error(error: tch::TchError) -> BenchError {
    BenchError::backend(LABEL, error.to_string())
}

impl DenseBackend for TorchBackend {
    type Matrix = Tensor;

    fn target(&self) -> Target {
        Target::new(Backend::Torch, self.device)
    }

    fn select_device(&mut self) -> BenchResult<()> {
        Ok(())
    }

    fn seed(&mut self, seed: u64) -> BenchResult<()> {
        // seeds the CPU and every CUDA generator
        tch::manual_seed(seed as i64);
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
        let n = size as i64;
        let tensor =
            Tensor::f_rand([n, n], (Kind::Double, self.tch_device)).map_err(torch_error)?;
        Ok(tensor.set_requires_grad(self.requires_grad))
    }

    fn multiply(&self, a: &Self::Matrix, b: &Self::Matrix) -> BenchResult<Self::Matrix> {
        a.f_mm(b).map_err(torch_error)
    }

    fn invert(&self, a: &Self::Matrix) -> BenchResult<Self::Matrix> {
        a.f_inverse().map_err(torch_error)
    }

    fn materialize(&self, _matrix: &Self::Matrix) -> BenchResult<()> {
        // CUDA kernels are launched asynchronously
        if let tch::Device::Cuda(index) = self.tch_device {
            tch::Cuda::synchronize(index as i64);
        }
        Ok(())
    }

    fn to_host(&self, matrix: &Self::Matrix) -> BenchResult<Vec<f64>> {
        let flat = matrix
            .detach()
            .to_device(tch::Device::Cpu)
            .contiguous()
            .f_reshape([-1])
            .map_err(torch_error)?;
        Vec::<f64>::try_from(&flat).map_err(torch_error)
    }
}
