//! In-process wall-clock harness.

use super::{CaseRoutine, Harness, Timing};
use crate::errors::{BenchError, BenchResult, ConfigurationError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Stopping rule of [`WallClockHarness`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallClockConfig {
    /// Untimed invocations before each case
    pub warmup_iterations: u32,
    /// A repetition runs at least this many invocations...
    pub min_iterations: u64,
    /// ...and for at least this long
    pub min_duration_ms: u64,
    pub repetitions: u32,
}

impl Default for WallClockConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 5,
            min_iterations: 10,
            min_duration_ms: 200,
            repetitions: 1,
        }
    }
}

impl WallClockConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_iterations == 0 {
            return Err(ConfigurationError::InvalidHarnessSetting {
                field: "min_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.repetitions == 0 {
            return Err(ConfigurationError::InvalidHarnessSetting {
                field: "repetitions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Times cases with `std::time::Instant` (real time, not CPU time)
#[derive(Debug, Clone, Default)]
pub struct WallClockHarness {
    config: WallClockConfig,
}

impl WallClockHarness {
    pub fn new(config: WallClockConfig) -> BenchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn run_repetition(
        &self,
        routine: &mut dyn CaseRoutine,
    ) -> BenchResult<(u64, Duration)> {
        let min_duration = Duration::from_millis(self.config.min_duration_ms);
        let mut iterations = 0u64;

        let start = Instant::now();
        loop {
            routine.invoke()?;
            iterations += 1;
            if iterations >= self.config.min_iterations && start.elapsed() >= min_duration {
                break;
            }
        }
        Ok((iterations, start.elapsed()))
    }
}

impl Harness for WallClockHarness {
    fn measure(
        &mut self,
        name: &str,
        routine: &mut dyn CaseRoutine,
    ) -> BenchResult<Option<Timing>> {
        routine.setup()?;

        info!(
            "Benchmarking {} ({} repetition(s), >= {} iterations, >= {} ms)...",
            name, self.config.repetitions, self.config.min_iterations, self.config.min_duration_ms
        );

        for _ in 0..self.config.warmup_iterations {
            routine.invoke()?;
        }

        let mut samples = Vec::with_capacity(self.config.repetitions as usize);
        for repetition in 0..self.config.repetitions {
            let (iterations, elapsed) = self.run_repetition(routine)?;
            debug!(
                "  {} repetition {}: {} iterations in {:?}",
                name, repetition, iterations, elapsed
            );
            samples.push((iterations, elapsed));
        }

        Timing::from_repetitions(&samples)
            .map(Some)
            .ok_or_else(|| BenchError::Harness {
                message: format!("no iterations recorded for {}", name),
            })
    }
}
