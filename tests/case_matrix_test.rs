//! Tests for case enumeration and naming.

use dense_bench::errors::{BenchError, ConfigurationError};
use dense_bench::{Backend, BenchmarkCase, CaseMatrix, Device, Operation, Target, SIZE_SWEEP};
use std::collections::HashSet;

fn all_targets() -> Vec<Target> {
    Target::ALL.to_vec()
}

#[test]
fn test_case_count_is_full_cartesian_product() {
    let targets = all_targets();
    let cases = CaseMatrix::build(&Operation::ALL, &targets, &SIZE_SWEEP).unwrap();

    assert_eq!(
        cases.len(),
        Operation::ALL.len() * targets.len() * SIZE_SWEEP.len()
    );
    assert_eq!(cases.len(), 180);

    let names: HashSet<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), cases.len());
}

#[test]
fn test_enumeration_order_is_operation_then_target_then_size() {
    let targets = vec![
        Target::host(Backend::Nalgebra),
        Target::new(Backend::Torch, Device::Cpu),
    ];
    let cases =
        CaseMatrix::build(&[Operation::Invert, Operation::Multiply], &targets, &[8, 2]).unwrap();

    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "NALGEBRA_INV_Size_2",
            "NALGEBRA_INV_Size_8",
            "TORCH_CPU_INV_Size_2",
            "TORCH_CPU_INV_Size_8",
            "NALGEBRA_MM_Size_2",
            "NALGEBRA_MM_Size_8",
            "TORCH_CPU_MM_Size_2",
            "TORCH_CPU_MM_Size_8",
        ]
    );
}

#[test]
fn test_enumeration_is_stable_across_builds() {
    let targets = all_targets();
    let first = CaseMatrix::build(&Operation::ALL, &targets, &SIZE_SWEEP).unwrap();
    let second = CaseMatrix::build(&Operation::ALL, &targets, &SIZE_SWEEP).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_case_names_follow_convention() {
    let case = BenchmarkCase::new(Operation::Multiply, Target::host(Backend::Nalgebra), 4);
    assert_eq!(case.name, "NALGEBRA_MM_Size_4");
    assert_eq!(case.operand_count(), 2);

    let case = BenchmarkCase::new(
        Operation::ChainMultiply,
        Target::new(Backend::ArrayFire, Device::OpenCl),
        512,
    );
    assert_eq!(case.name, "ARRAYFIRE_OPENCL_CM_Size_512");
    assert_eq!(case.operand_count(), 6);

    let case = BenchmarkCase::new(
        Operation::Invert,
        Target::new(Backend::Torch, Device::Gpu),
        3,
    );
    assert_eq!(case.name, "TORCH_GPU_INV_Size_3");
    assert_eq!(case.operand_count(), 1);
}

#[test]
fn test_single_operation_uses_fixed_sweep() {
    let cases =
        CaseMatrix::for_operation(Operation::Invert, &[Target::host(Backend::Nalgebra)]).unwrap();
    let sizes: Vec<usize> = cases.iter().map(|c| c.size).collect();
    assert_eq!(sizes, SIZE_SWEEP.to_vec());
    assert!(cases.iter().all(|c| c.operation == Operation::Invert));
}

#[test]
fn test_duplicate_axis_entries_are_rejected() {
    let nalgebra = Target::host(Backend::Nalgebra);

    let result = CaseMatrix::build(&[Operation::Multiply], &[nalgebra, nalgebra], &[2]);
    assert!(matches!(
        result,
        Err(BenchError::Configuration(ConfigurationError::DuplicateEntry { ref field, .. }))
            if field == "targets"
    ));

    let result = CaseMatrix::build(&[Operation::Multiply], &[nalgebra], &[4, 2, 4]);
    assert!(matches!(
        result,
        Err(BenchError::Configuration(ConfigurationError::DuplicateEntry { ref field, .. }))
            if field == "sizes"
    ));
}

#[test]
fn test_invalid_axes_are_rejected() {
    let nalgebra = Target::host(Backend::Nalgebra);

    assert!(matches!(
        CaseMatrix::build(&[Operation::Multiply], &[nalgebra], &[0, 2]),
        Err(BenchError::Configuration(ConfigurationError::InvalidSize { size: 0 }))
    ));
    assert!(matches!(
        CaseMatrix::build(&[], &[nalgebra], &[2]),
        Err(BenchError::Configuration(ConfigurationError::EmptyConfiguration { .. }))
    ));
    assert!(matches!(
        CaseMatrix::build(&[Operation::Multiply], &[], &[2]),
        Err(BenchError::Configuration(ConfigurationError::EmptyConfiguration { .. }))
    ));
}

#[test]
fn test_operand_counts() {
    assert_eq!(Operation::Multiply.operand_count(), 2);
    assert_eq!(Operation::ChainMultiply.operand_count(), 6);
    assert_eq!(Operation::Invert.operand_count(), 1);
}
