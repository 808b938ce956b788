//! Serialized access to a process-wide "active device" switch.
//!
//! Accelerated-array libraries keep the active compute back end in global
//! state. A case takes a [`DeviceLease`] before generating its operands and
//! keeps it until its measurement ends; a second case asking for the same
//! selector meanwhile gets a configuration error instead of a silent switch.

use crate::cases::Device;
use crate::errors::{BenchResult, ConfigurationError};
use log::warn;
use std::sync::{Mutex, MutexGuard, TryLockError};

pub struct DeviceSelector {
    backend: &'static str,
    active: Mutex<Option<Device>>,
}

impl DeviceSelector {
    pub const fn new(backend: &'static str) -> Self {
        Self {
            backend,
            active: Mutex::new(None),
        }
    }

    /// Takes exclusive ownership of the switch for `device`
    pub fn acquire(&'static self, device: Device) -> Result<DeviceLease, ConfigurationError> {
        let guard = match self.active.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => {
                warn!(
                    "Device selector of {} was poisoned by a failed case; recovering",
                    self.backend
                );
                poisoned.into_inner()
            }
            Err(TryLockError::WouldBlock) => {
                return Err(ConfigurationError::DeviceSelectorBusy {
                    backend: self.backend.to_string(),
                });
            }
        };

        Ok(DeviceLease {
            device,
            guard,
        })
    }

    /// True while some case holds a lease
    pub fn is_held(&self) -> bool {
        matches!(self.active.try_lock(), Err(TryLockError::WouldBlock))
    }
}

/// Exclusive use of a [`DeviceSelector`]; released on drop
pub struct DeviceLease {
    device: Device,
    guard: MutexGuard<'static, Option<Device>>,
}

impl DeviceLease {
    pub fn device(&self) -> Device {
        self.device
    }

    /// Device most recently switched to through any lease on this selector
    pub fn active(&self) -> Option<Device> {
        *self.guard
    }

    /// Flips the global switch to the leased device
    pub fn activate<F>(&mut self, switch: F) -> BenchResult<()>
    where
        F: FnOnce(Device) -> BenchResult<()>,
    {
        switch(self.device)?;
        *self.guard = Some(self.device);
        Ok(())
    }
}
