//! Result reporting for the wall-clock runner.

use crate::driver::{CaseOutcome, CaseStatus};
use crate::errors::{BenchError, BenchResult};
use log::error;
use serde::Serialize;

/// Flat, serializable view of one case outcome; times in microseconds
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub name: String,
    pub backend: String,
    pub device: Option<String>,
    pub operation: String,
    pub size: usize,
    pub status: &'static str,
    pub mean_time_us: Option<f64>,
    pub min_time_us: Option<f64>,
    pub max_time_us: Option<f64>,
    pub iterations: Option<u64>,
    pub error: Option<String>,
}

impl From<&CaseOutcome> for CaseRecord {
    fn from(outcome: &CaseOutcome) -> Self {
        let case = &outcome.case;
        let timing = outcome.timing();
        let status = match outcome.status {
            CaseStatus::Measured(_) => "measured",
            CaseStatus::Failed(_) => "failed",
            CaseStatus::Skipped => "skipped",
        };

        Self {
            name: case.name.clone(),
            backend: case.target.backend.label().to_string(),
            device: case.target.device.map(|device| device.label().to_string()),
            operation: case.operation.code().to_string(),
            size: case.size,
            status,
            mean_time_us: timing.map(|t| t.mean_time_us),
            min_time_us: timing.map(|t| t.min_time_us),
            max_time_us: timing.map(|t| t.max_time_us),
            iterations: timing.map(|t| t.iterations),
            error: outcome.error().map(|e| e.to_string()),
        }
    }
}

/// All outcomes of one run, in enumeration order
#[derive(Debug)]
pub struct RunReport {
    outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<CaseOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    pub fn measured_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_measured()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, CaseStatus::Skipped))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn records(&self) -> Vec<CaseRecord> {
        self.outcomes.iter().map(CaseRecord::from).collect()
    }

    pub fn to_json(&self) -> BenchResult<String> {
        serde_json::to_string_pretty(&self.records()).map_err(|e| BenchError::Harness {
            message: format!("cannot serialize report: {}", e),
        })
    }

    pub fn log_failures(&self) {
        for outcome in self.failures() {
            if let Some(e) = outcome.error() {
                error!("{} failed: {}", outcome.case.name, e);
            }
        }
    }

    /// Prints a results table followed by the failure list
    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(80));
        println!("Dense Linear Algebra Benchmarks");
        println!("{}", "=".repeat(80));
        println!(
            "{:<36} {:>12} {:>12} {:>12} {:>10}",
            "Case", "Time(us)", "Min(us)", "Max(us)", "Iters"
        );
        println!("{}", "-".repeat(80));

        for outcome in &self.outcomes {
            match &outcome.status {
                CaseStatus::Measured(Some(t)) => println!(
                    "{:<36} {:>12.3} {:>12.3} {:>12.3} {:>10}",
                    outcome.case.name, t.mean_time_us, t.min_time_us, t.max_time_us, t.iterations
                ),
                CaseStatus::Measured(None) => {
                    println!("{:<36} {:>12}", outcome.case.name, "reported")
                }
                CaseStatus::Failed(_) => println!("{:<36} {:>12}", outcome.case.name, "FAILED"),
                CaseStatus::Skipped => {}
            }
        }

        let failures: Vec<&CaseOutcome> = self.failures().collect();
        if !failures.is_empty() {
            println!("\n{} case(s) failed:", failures.len());
            for outcome in failures {
                if let Some(e) = outcome.error() {
                    println!("   {}: {}", outcome.case.name, e);
                }
            }
        }

        println!("\n{}", "=".repeat(80));
        println!(
            "{} measured, {} failed, {} skipped, {} total",
            self.measured_count(),
            self.failures().count(),
            self.skipped_count(),
            self.outcomes.len()
        );
        println!("{}", "=".repeat(80));
    }
}
