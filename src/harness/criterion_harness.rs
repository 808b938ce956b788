//! Criterion as the external measurement framework.
//!
//! Criterion owns iteration counts, statistics, command-line flags and report
//! emission; this harness only registers one benchmark per case name.

use super::{CaseRoutine, Harness, Timing};
use crate::cases::{CaseMatrix, Operation};
use crate::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
use crate::driver::TimedLoopDriver;
use crate::errors::{BenchError, BenchResult};
use crate::report::RunReport;
use criterion::Criterion;
use log::{error, info};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Unwind payload that stops criterion mid-measurement
struct MeasurementAborted;

pub struct CriterionHarness<'c> {
    criterion: &'c mut Criterion,
}

impl<'c> CriterionHarness<'c> {
    pub fn new(criterion: &'c mut Criterion) -> Self {
        Self { criterion }
    }
}

/// Records `error` and unwinds out of `bench_function` before criterion
/// takes another sample
fn abort(failure: &mut Option<BenchError>, error: BenchError) -> ! {
    *failure = Some(error);
    panic::resume_unwind(Box::new(MeasurementAborted))
}

impl Harness for CriterionHarness<'_> {
    fn measure(
        &mut self,
        name: &str,
        routine: &mut dyn CaseRoutine,
    ) -> BenchResult<Option<Timing>> {
        let mut failure: Option<BenchError> = None;
        let criterion = &mut *self.criterion;

        // criterion only calls the closure for cases its own filter selects
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            criterion.bench_function(name, |bencher| {
                if let Err(error) = routine.setup() {
                    abort(&mut failure, error);
                }
                bencher.iter(|| {
                    if let Err(error) = routine.invoke() {
                        abort(&mut failure, error);
                    }
                })
            });
        }));

        match (result, failure) {
            (_, Some(error)) => Err(error),
            (Ok(()), None) => Ok(None),
            (Err(payload), None) => panic::resume_unwind(payload),
        }
    }
}

/// Registers and runs every configured case of `operation` with criterion
///
/// Used by the bench targets, one per operation family.
pub fn bench_operation(criterion: &mut Criterion, operation: Operation) {
    let _ = env_logger::try_init();

    let config = match ConfigLoader::load(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot load benchmark configuration: {}", e);
            return;
        }
    };

    let cases = match CaseMatrix::build(&[operation], &config.targets, &config.sizes) {
        Ok(cases) => cases,
        Err(e) => {
            error!("Cannot build {} cases: {}", operation.code(), e);
            return;
        }
    };

    info!(
        "Registering {} cases for {}",
        cases.len(),
        operation.description()
    );

    let mut driver = TimedLoopDriver::new(CriterionHarness::new(criterion), config.backend);
    let report = RunReport::new(driver.run_all(&cases));
    report.log_failures();
    info!(
        "{}: {} measured, {} skipped by the criterion filter",
        operation.code(),
        report.measured_count(),
        report.skipped_count()
    );
}
