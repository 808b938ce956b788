//! Timed-loop driver.
//!
//! For each case the harness is handed a [`CaseRoutine`] whose setup opens
//! the adapter, generates the operands, runs one untimed verification
//! invocation and re-selects the device. The harness then times repeated
//! invocations. A case that fails or panics is reported on its own and never
//! stops its siblings.

use crate::backends::{self, BackendOptions, DenseBackend};
use crate::cases::{BenchmarkCase, Operation};
use crate::errors::{BenchError, BenchResult};
use crate::harness::{CaseRoutine, Harness, Timing};
use crate::input_generator::generate_operands;
use log::{debug, error, info};
use regex::Regex;
use std::any::Any;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};

/// A case whose adapter is open and whose operands are generated
pub trait PreparedCase {
    /// Re-selects the case's device right before measurement
    fn activate(&mut self) -> BenchResult<()>;

    /// One full invocation of the operation on the prepared operands
    fn invoke(&mut self) -> BenchResult<()>;
}

struct Prepared<B: DenseBackend> {
    backend: B,
    operation: Operation,
    operands: Vec<B::Matrix>,
}

impl<B: DenseBackend> PreparedCase for Prepared<B> {
    fn activate(&mut self) -> BenchResult<()> {
        self.backend.select_device()
    }

    fn invoke(&mut self) -> BenchResult<()> {
        let result = backends::execute(&self.backend, self.operation, &self.operands)?;
        black_box(result);
        Ok(())
    }
}

/// Selects the backend's device and generates the operands of `case` once
pub fn prepare<B>(mut backend: B, case: &BenchmarkCase) -> BenchResult<Box<dyn PreparedCase>>
where
    B: DenseBackend + 'static,
    B::Matrix: 'static,
{
    backend.select_device()?;
    let operands = generate_operands(&mut backend, case.operation, case.size)?;
    Ok(Box::new(Prepared {
        backend,
        operation: case.operation,
        operands,
    }))
}

/// Terminal state of a case
#[derive(Debug)]
pub enum CaseStatus {
    /// Timed; `None` when the harness reported on its own
    Measured(Option<Timing>),
    Failed(BenchError),
    /// Excluded by the name filter or never set up by the harness
    Skipped,
}

/// Defers preparation until the harness asks for it
struct DeferredCase<F> {
    prepare: Option<F>,
    prepared: Option<Box<dyn PreparedCase>>,
}

impl<F> DeferredCase<F>
where
    F: FnOnce() -> BenchResult<Box<dyn PreparedCase>>,
{
    fn new(prepare: F) -> Self {
        Self {
            prepare: Some(prepare),
            prepared: None,
        }
    }

    fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }
}

impl<F> CaseRoutine for DeferredCase<F>
where
    F: FnOnce() -> BenchResult<Box<dyn PreparedCase>>,
{
    fn setup(&mut self) -> BenchResult<()> {
        let Some(prepare) = self.prepare.take() else {
            return Ok(());
        };

        let mut prepared = prepare()?;
        // surfaces backend failures before anything is timed
        prepared.invoke()?;
        prepared.activate()?;
        self.prepared = Some(prepared);
        Ok(())
    }

    fn invoke(&mut self) -> BenchResult<()> {
        match self.prepared.as_mut() {
            Some(prepared) => prepared.invoke(),
            None => Err(BenchError::Harness {
                message: "case invoked before setup".to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub struct CaseOutcome {
    pub case: BenchmarkCase,
    pub status: CaseStatus,
}

impl CaseOutcome {
    pub fn is_measured(&self) -> bool {
        matches!(self.status, CaseStatus::Measured(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, CaseStatus::Failed(_))
    }

    pub fn timing(&self) -> Option<&Timing> {
        match &self.status {
            CaseStatus::Measured(timing) => timing.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&BenchError> {
        match &self.status {
            CaseStatus::Failed(error) => Some(error),
            _ => None,
        }
    }
}

pub struct TimedLoopDriver<H: Harness> {
    harness: H,
    options: BackendOptions,
    filter: Option<Regex>,
}

impl<H: Harness> TimedLoopDriver<H> {
    pub fn new(harness: H, options: BackendOptions) -> Self {
        Self {
            harness,
            options,
            filter: None,
        }
    }

    /// Only run cases whose name matches `pattern`
    pub fn with_filter(mut self, pattern: &str) -> BenchResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| BenchError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        self.filter = Some(regex);
        Ok(self)
    }

    pub fn harness(&self) -> &H {
        &self.harness
    }

    pub fn into_harness(self) -> H {
        self.harness
    }

    pub fn is_selected(&self, case: &BenchmarkCase) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter.is_match(&case.name))
    }

    /// Runs every case in order
    pub fn run_all(&mut self, cases: &[BenchmarkCase]) -> Vec<CaseOutcome> {
        info!("Running {} benchmark cases", cases.len());
        cases.iter().map(|case| self.run_case(case)).collect()
    }

    /// Runs `case` on the adapter registered for its backend
    pub fn run_case(&mut self, case: &BenchmarkCase) -> CaseOutcome {
        let options = self.options.clone();
        self.run_with(case, move || backends::prepare_case(case, &options))
    }

    /// Runs `case` on whatever adapter `prepare` opens
    pub fn run_with<F>(&mut self, case: &BenchmarkCase, prepare: F) -> CaseOutcome
    where
        F: FnOnce() -> BenchResult<Box<dyn PreparedCase>>,
    {
        if !self.is_selected(case) {
            debug!("{}: skipped by filter", case.name);
            return CaseOutcome {
                case: case.clone(),
                status: CaseStatus::Skipped,
            };
        }

        info!("{}: handing {}x{} case to the harness", case.name, case.size, case.size);
        let harness = &mut self.harness;
        let result =
            panic::catch_unwind(AssertUnwindSafe(|| measure_case(harness, case, prepare)));

        let status = match result {
            Ok(Ok(CaseStatus::Measured(timing))) => {
                match &timing {
                    Some(timing) => info!(
                        "{}: {:.3} us over {} iterations",
                        case.name, timing.mean_time_us, timing.iterations
                    ),
                    None => info!("{}: measured", case.name),
                }
                CaseStatus::Measured(timing)
            }
            Ok(Ok(status)) => {
                debug!("{}: not selected by the harness", case.name);
                status
            }
            Ok(Err(e)) => {
                error!("{}: {}", case.name, e);
                CaseStatus::Failed(e)
            }
            Err(payload) => {
                let e = BenchError::BackendPanicked {
                    case: case.name.clone(),
                    message: panic_message(payload.as_ref()),
                };
                error!("{}", e);
                CaseStatus::Failed(e)
            }
        };

        CaseOutcome {
            case: case.clone(),
            status,
        }
    }
}

fn measure_case<H, F>(
    harness: &mut H,
    case: &BenchmarkCase,
    prepare: F,
) -> BenchResult<CaseStatus>
where
    H: Harness,
    F: FnOnce() -> BenchResult<Box<dyn PreparedCase>>,
{
    let mut routine = DeferredCase::new(prepare);
    let timing = harness.measure(&case.name, &mut routine)?;

    if routine.is_prepared() {
        Ok(CaseStatus::Measured(timing))
    } else {
        Ok(CaseStatus::Skipped)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
