//! Measurement harnesses.
//!
//! A harness owns the timed loop: it decides whether a case runs at all, how
//! many iterations to time and how to summarize them. The driver only hands it
//! a [`CaseRoutine`].

pub mod criterion_harness;
pub mod wall_clock;

pub use criterion_harness::{bench_operation, CriterionHarness};
pub use wall_clock::{WallClockConfig, WallClockHarness};

use crate::errors::BenchResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One case as seen by a harness
pub trait CaseRoutine {
    /// Opens the backend, draws the operands and runs the untimed verification call
    ///
    /// Idempotent: only the first call does any work. A harness that never
    /// calls it leaves the case skipped.
    fn setup(&mut self) -> BenchResult<()>;

    /// One full invocation of the case's operation
    fn invoke(&mut self) -> BenchResult<()>;
}

pub trait Harness {
    /// Sets up `routine` and runs it repeatedly under `name` until the
    /// harness' stopping rule is met
    ///
    /// Returns `None` when the harness reports results on its own.
    fn measure(
        &mut self,
        name: &str,
        routine: &mut dyn CaseRoutine,
    ) -> BenchResult<Option<Timing>>;
}

/// Wall-clock timing of a case, in microseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub iterations: u64,
    pub repetitions: u32,
    pub total_time_ns: u64,
    /// Mean over every timed iteration
    pub mean_time_us: f64,
    /// Fastest repetition mean
    pub min_time_us: f64,
    /// Slowest repetition mean
    pub max_time_us: f64,
}

impl Timing {
    /// Summarizes `(iterations, elapsed)` pairs, one per repetition
    pub fn from_repetitions(samples: &[(u64, Duration)]) -> Option<Self> {
        let iterations: u64 = samples.iter().map(|(iterations, _)| iterations).sum();
        if iterations == 0 {
            return None;
        }

        let total: Duration = samples.iter().map(|(_, elapsed)| *elapsed).sum();
        let per_repetition = samples
            .iter()
            .filter(|(iterations, _)| *iterations > 0)
            .map(|(iterations, elapsed)| micros(*elapsed) / *iterations as f64);

        let (min_time_us, max_time_us) = per_repetition
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), mean| {
                (lo.min(mean), hi.max(mean))
            });

        Some(Self {
            iterations,
            repetitions: samples.len() as u32,
            total_time_ns: u64::try_from(total.as_nanos()).unwrap_or(u64::MAX),
            mean_time_us: micros(total) / iterations as f64,
            min_time_us,
            max_time_us,
        })
    }
}

fn micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}
