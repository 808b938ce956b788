//! Benchmark configuration and its JSON loader.

use crate::backends::BackendOptions;
use crate::cases::{BenchmarkCase, CaseMatrix, Operation, Target, SIZE_SWEEP};
use crate::errors::{BenchError, BenchResult};
use crate::harness::WallClockConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "configs/dense_bench.json";

/// What to run and how to time it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub operations: Vec<Operation>,
    pub targets: Vec<Target>,
    pub sizes: Vec<usize>,
    pub harness: WallClockConfig,
    pub backend: BackendOptions,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            operations: Operation::ALL.to_vec(),
            targets: Target::compiled_defaults(),
            sizes: SIZE_SWEEP.to_vec(),
            harness: WallClockConfig::default(),
            backend: BackendOptions::default(),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> BenchResult<()> {
        CaseMatrix::validate_axes(&self.operations, &self.targets, &self.sizes)?;
        self.harness.validate()?;
        Ok(())
    }

    /// The ordered case matrix described by this configuration
    pub fn cases(&self) -> BenchResult<Vec<BenchmarkCase>> {
        CaseMatrix::build(&self.operations, &self.targets, &self.sizes)
    }
}

/// Loads JSON configuration files, falling back to defaults
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads and validates `path`; a missing file yields the default configuration
    pub fn load(path: &Path) -> BenchResult<BenchConfig> {
        let config = match fs::read_to_string(path) {
            Ok(content) => {
                info!("Loading benchmark configuration from {}", path.display());
                Self::parse(&content, path)?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Config file '{}' not found, using default configuration",
                    path.display()
                );
                BenchConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str, path: &Path) -> BenchResult<BenchConfig> {
        serde_json::from_str(content).map_err(|source| BenchError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }
}
