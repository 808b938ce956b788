//! Wall-clock benchmark runner for the dense linear-algebra case matrix.
//!
//! Run with: cargo run --release --bin dense_bench -- --filter 'NALGEBRA_.*_Size_(64|128)'

use clap::{Parser, ValueEnum};
use dense_bench::config::DEFAULT_CONFIG_PATH;
use dense_bench::{BenchResult, ConfigLoader, RunReport, TimedLoopDriver, WallClockHarness};
use log::error;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Console,
    Json,
}

/// Time dense multiplication, chained multiplication and inversion across backends
#[derive(Parser, Debug)]
#[command(name = "dense_bench")]
struct Cli {
    /// JSON configuration file; defaults apply when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Only run cases whose name matches this regular expression
    #[arg(long)]
    filter: Option<String>,

    /// Number of timed repetitions per case
    #[arg(long)]
    repetitions: Option<u32>,

    /// Minimum timed iterations per repetition
    #[arg(long)]
    min_iterations: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// List case names and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Benchmark execution failed: {}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every selected case was measured
fn run(cli: Cli) -> BenchResult<bool> {
    let mut config = ConfigLoader::load(&cli.config)?;
    if let Some(repetitions) = cli.repetitions {
        config.harness.repetitions = repetitions;
    }
    if let Some(min_iterations) = cli.min_iterations {
        config.harness.min_iterations = min_iterations;
    }

    let cases = config.cases()?;

    let harness = WallClockHarness::new(config.harness.clone())?;
    let mut driver = TimedLoopDriver::new(harness, config.backend.clone());
    if let Some(pattern) = &cli.filter {
        driver = driver.with_filter(pattern)?;
    }

    if cli.list {
        for case in cases.iter().filter(|case| driver.is_selected(case)) {
            println!("{}", case.name);
        }
        return Ok(true);
    }

    let report = RunReport::new(driver.run_all(&cases));
    match cli.format {
        OutputFormat::Console => report.print_summary(),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(!report.has_failures())
}
