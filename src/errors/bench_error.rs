//! Top-level error type for benchmark operations.

use super::configuration_error::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Backend {backend} failed: {message}")]
    BackendExecution { backend: String, message: String },

    #[error("Case '{case}' panicked: {message}")]
    BackendPanicked { case: String, message: String },

    #[error("Measurement harness error: {message}")]
    Harness { message: String },

    #[error("Failed to parse configuration file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid case filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Shorthand for a failure raised by a numeric library
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        BenchError::BackendExecution {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// True for errors detected before any timing began
    pub fn is_configuration(&self) -> bool {
        matches!(self, BenchError::Configuration(_))
    }
}
