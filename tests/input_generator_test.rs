//! Tests for deterministic operand generation.

use dense_bench::errors::{BenchError, ConfigurationError};
use dense_bench::input_generator::{generate_operand, generate_operands, seed_for};
use dense_bench::{DenseBackend, NalgebraBackend, Operation, SIZE_SWEEP};

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

fn host_operand(backend: &mut NalgebraBackend, size: usize, index: usize) -> Vec<f64> {
    let operand = generate_operand(backend, size, index).unwrap();
    backend.to_host(&operand).unwrap()
}

#[test]
fn test_regeneration_is_bit_identical() {
    for &size in SIZE_SWEEP.iter().filter(|&&s| s <= 64) {
        for index in 0..Operation::ChainMultiply.operand_count() {
            let first = host_operand(&mut NalgebraBackend::new(), size, index);
            let second = host_operand(&mut NalgebraBackend::new(), size, index);
            assert_eq!(bits(&first), bits(&second), "size {} operand {}", size, index);
        }
    }
}

#[test]
fn test_operand_does_not_depend_on_generation_order() {
    let mut forward = NalgebraBackend::new();
    let in_order = generate_operands(&mut forward, Operation::ChainMultiply, 8).unwrap();

    let mut reverse = NalgebraBackend::new();
    let last_first = host_operand(&mut reverse, 8, 5);
    let then_first = host_operand(&mut reverse, 8, 0);

    assert_eq!(bits(&forward.to_host(&in_order[5]).unwrap()), bits(&last_first));
    assert_eq!(bits(&forward.to_host(&in_order[0]).unwrap()), bits(&then_first));
}

#[test]
fn test_operands_use_their_index_as_seed() {
    assert_eq!(seed_for(0), 0);
    assert_eq!(seed_for(5), 5);

    let mut backend = NalgebraBackend::new();
    let operands = generate_operands(&mut backend, Operation::Multiply, 4).unwrap();
    assert_eq!(operands.len(), 2);

    let first = backend.to_host(&operands[0]).unwrap();
    let second = backend.to_host(&operands[1]).unwrap();
    assert_ne!(bits(&first), bits(&second));

    let mut reseeded = NalgebraBackend::new();
    reseeded.seed(1).unwrap();
    let drawn = reseeded.random(4).unwrap();
    assert_eq!(bits(&reseeded.to_host(&drawn).unwrap()), bits(&second));
}

#[test]
fn test_operand_shape_and_range() {
    let mut backend = NalgebraBackend::new();
    for &size in &SIZE_SWEEP {
        let operand = generate_operand(&mut backend, size, 0).unwrap();
        assert_eq!(operand.shape(), (size, size));
        assert!(operand.iter().all(|v| (-1.0..1.0).contains(v)));
    }
}

#[test]
fn test_draw_without_seed_fails_fast() {
    let mut backend = NalgebraBackend::new();
    assert!(matches!(
        backend.random(4),
        Err(BenchError::Configuration(ConfigurationError::UnseededRandomState { .. }))
    ));

    // a seed covers exactly one draw
    backend.seed(3).unwrap();
    assert!(backend.random(4).is_ok());
    assert!(backend.random(4).is_err());
}

#[test]
fn test_zero_size_is_a_configuration_error() {
    let mut backend = NalgebraBackend::new();
    assert!(matches!(
        generate_operand(&mut backend, 0, 0),
        Err(BenchError::Configuration(ConfigurationError::InvalidSize { size: 0 }))
    ));
}
