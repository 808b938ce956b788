//! Error types for invalid benchmark configurations.

use thiserror::Error;

/// Problems detected while building or setting up a case, before any timing begins
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Backend {backend} does not support device {device}")]
    UnsupportedDevice { backend: String, device: String },

    #[error("Device {device} of backend {backend} is not available: {reason}")]
    DeviceUnavailable {
        backend: String,
        device: String,
        reason: String,
    },

    #[error("Backend {backend} was not compiled in; rebuild with `--features {feature}`")]
    BackendNotCompiled { backend: String, feature: String },

    #[error("Random state of backend {backend} was not seeded before drawing an operand")]
    UnseededRandomState { backend: String },

    #[error("Active device selector of backend {backend} is held by another case")]
    DeviceSelectorBusy { backend: String },

    #[error("Configuration field '{field}' must not be empty")]
    EmptyConfiguration { field: String },

    #[error("Invalid matrix size {size}: must be greater than 0")]
    InvalidSize { size: usize },

    #[error("Duplicate entry '{entry}' in configuration field '{field}'")]
    DuplicateEntry { field: String, entry: String },

    #[error("Invalid harness setting '{field}': {message}")]
    InvalidHarnessSetting { field: String, message: String },
}
