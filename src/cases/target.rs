//! Backend and device identifiers.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric library that executes the benchmarked operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// General-purpose CPU dense-algebra library
    Nalgebra,
    /// Tensor library; the device is a per-tensor construction option
    Torch,
    /// Accelerated array library; the device is a process-wide switch
    ArrayFire,
}

impl Backend {
    pub const fn label(self) -> &'static str {
        match self {
            Backend::Nalgebra => "NALGEBRA",
            Backend::Torch => "TORCH",
            Backend::ArrayFire => "ARRAYFIRE",
        }
    }

    /// Cargo feature that compiles the backend in, if it is optional
    pub const fn feature(self) -> Option<&'static str> {
        match self {
            Backend::Nalgebra => None,
            Backend::Torch => Some("torch"),
            Backend::ArrayFire => Some("arrayfire"),
        }
    }

    pub const fn is_compiled(self) -> bool {
        match self {
            Backend::Nalgebra => true,
            Backend::Torch => cfg!(feature = "torch"),
            Backend::ArrayFire => cfg!(feature = "arrayfire"),
        }
    }

    /// Devices the backend can target; empty for host-only libraries
    pub const fn supported_devices(self) -> &'static [Device] {
        match self {
            Backend::Nalgebra => &[],
            Backend::Torch => &[Device::Cpu, Device::Gpu],
            Backend::ArrayFire => &[Device::Cpu, Device::Cuda, Device::OpenCl],
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A compute target inside a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    /// The backend's default GPU
    Gpu,
    Cuda,
    OpenCl,
}

impl Device {
    pub const fn label(self) -> &'static str {
        match self {
            Device::Cpu => "CPU",
            Device::Gpu => "GPU",
            Device::Cuda => "CUDA",
            Device::OpenCl => "OPENCL",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Backend plus the device it should run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub backend: Backend,
    #[serde(default)]
    pub device: Option<Device>,
}

impl Target {
    pub const fn new(backend: Backend, device: Device) -> Self {
        Self {
            backend,
            device: Some(device),
        }
    }

    /// A target for a host-only backend
    pub const fn host(backend: Backend) -> Self {
        Self {
            backend,
            device: None,
        }
    }

    /// Every known target, in registration order
    pub const ALL: [Target; 6] = [
        Target::new(Backend::Torch, Device::Cpu),
        Target::new(Backend::Torch, Device::Gpu),
        Target::host(Backend::Nalgebra),
        Target::new(Backend::ArrayFire, Device::Cpu),
        Target::new(Backend::ArrayFire, Device::Cuda),
        Target::new(Backend::ArrayFire, Device::OpenCl),
    ];

    /// Targets whose backend is compiled into this build
    pub fn compiled_defaults() -> Vec<Target> {
        Self::ALL
            .into_iter()
            .filter(|target| target.backend.is_compiled())
            .collect()
    }

    /// `<BACKEND>[_<DEVICE>]`, the prefix of every case name
    pub fn label(&self) -> String {
        match self.device {
            Some(device) => format!("{}_{}", self.backend.label(), device.label()),
            None => self.backend.label().to_string(),
        }
    }

    /// Checks the device against what the backend supports, never downgrading
    pub fn check_device(&self) -> Result<(), ConfigurationError> {
        let supported = self.backend.supported_devices();
        match self.device {
            None if supported.is_empty() => Ok(()),
            Some(device) if supported.contains(&device) => Ok(()),
            None => Err(ConfigurationError::UnsupportedDevice {
                backend: self.backend.label().to_string(),
                device: "<none>".to_string(),
            }),
            Some(device) => Err(ConfigurationError::UnsupportedDevice {
                backend: self.backend.label().to_string(),
                device: device.label().to_string(),
            }),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
