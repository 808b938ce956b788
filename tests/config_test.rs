//! Tests for configuration loading and result reporting.

use dense_bench::errors::{BenchError, ConfigurationError};
use dense_bench::{
    Backend, BackendOptions, BenchConfig, ConfigLoader, Device, Operation, RunReport, Target,
    TimedLoopDriver, WallClockConfig, WallClockHarness, SIZE_SWEEP,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[cfg(test)]
mod config_loader_tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(&dir.path().join("absent.json")).unwrap();

        assert_eq!(config.operations, Operation::ALL.to_vec());
        assert_eq!(config.sizes, SIZE_SWEEP.to_vec());
        assert_eq!(config.targets, Target::compiled_defaults());
        assert!(config.targets.contains(&Target::host(Backend::Nalgebra)));
        assert_eq!(config.harness, WallClockConfig::default());
        assert!(config.backend.torch_requires_grad);
    }

    #[test]
    fn test_loads_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(
            &path,
            r#"{
                "operations": ["invert"],
                "targets": [
                    { "backend": "nalgebra" },
                    { "backend": "arrayfire", "device": "opencl" }
                ],
                "sizes": [64, 2],
                "harness": { "repetitions": 3 }
            }"#,
        )
        .unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.operations, vec![Operation::Invert]);
        assert_eq!(
            config.targets[1],
            Target::new(Backend::ArrayFire, Device::OpenCl)
        );
        assert_eq!(config.harness.repetitions, 3);
        assert_eq!(config.harness.min_iterations, 10);

        let names: Vec<String> = config.cases().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "NALGEBRA_INV_Size_2",
                "NALGEBRA_INV_Size_64",
                "ARRAYFIRE_OPENCL_INV_Size_2",
                "ARRAYFIRE_OPENCL_INV_Size_64",
            ]
        );
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{ "operations": ["transpose"] }"#).unwrap();

        assert!(matches!(
            ConfigLoader::load(&path),
            Err(BenchError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");

        fs::write(&path, r#"{ "sizes": [] }"#).unwrap();
        assert!(matches!(
            ConfigLoader::load(&path),
            Err(BenchError::Configuration(ConfigurationError::EmptyConfiguration { .. }))
        ));

        fs::write(&path, r#"{ "harness": { "min_iterations": 0 } }"#).unwrap();
        assert!(matches!(
            ConfigLoader::load(&path),
            Err(BenchError::Configuration(ConfigurationError::InvalidHarnessSetting { .. }))
        ));
    }

    #[test]
    fn test_bundled_configs_parse() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs");
        for file in ["dense_bench.json", "all_backends.json"] {
            let content = fs::read_to_string(root.join(file)).unwrap();
            let config = ConfigLoader::parse(&content, Path::new(file)).unwrap();
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_default_config_round_trips() {
        let config = BenchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = ConfigLoader::parse(&json, Path::new("inline")).unwrap();

        assert_eq!(parsed.targets, config.targets);
        assert_eq!(parsed.operations, config.operations);
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    fn quick_harness() -> WallClockHarness {
        WallClockHarness::new(WallClockConfig {
            warmup_iterations: 0,
            min_iterations: 2,
            min_duration_ms: 0,
            repetitions: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_report_records() {
        let cases = vec![
            dense_bench::BenchmarkCase::new(
                Operation::Multiply,
                Target::host(Backend::Nalgebra),
                3,
            ),
            dense_bench::BenchmarkCase::new(
                Operation::Multiply,
                Target::new(Backend::Nalgebra, Device::Cuda),
                3,
            ),
        ];
        let mut driver = TimedLoopDriver::new(quick_harness(), BackendOptions::default());
        let report = RunReport::new(driver.run_all(&cases));

        assert_eq!(report.measured_count(), 1);
        assert!(report.has_failures());

        let records = report.records();
        assert_eq!(records[0].status, "measured");
        assert_eq!(records[0].iterations, Some(4));
        assert!(records[0].mean_time_us.unwrap() > 0.0);
        assert_eq!(records[1].status, "failed");
        assert_eq!(records[1].device.as_deref(), Some("CUDA"));
        assert!(records[1].error.is_some());

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["name"], "NALGEBRA_MM_Size_3");
        assert_eq!(json[1]["status"], "failed");
    }
}
