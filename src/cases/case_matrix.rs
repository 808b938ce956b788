//! Enumeration of the operation × target × size case matrix.

use super::operation::Operation;
use super::target::Target;
use crate::errors::{BenchResult, ConfigurationError};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// Square matrix sizes swept by every operation
pub const SIZE_SWEEP: [usize; 10] = [2, 3, 4, 8, 16, 32, 64, 128, 256, 512];

/// One independently timed (operation, target, size) combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkCase {
    pub operation: Operation,
    pub target: Target,
    pub size: usize,
    /// `<BACKEND>_[<DEVICE>_]<OPERATION>_Size_<N>`
    pub name: String,
}

impl BenchmarkCase {
    pub fn new(operation: Operation, target: Target, size: usize) -> Self {
        Self {
            operation,
            target,
            size,
            name: Self::case_name(operation, &target, size),
        }
    }

    /// Display name of a case; a pure function of the tuple
    pub fn case_name(operation: Operation, target: &Target, size: usize) -> String {
        format!("{}_{}_Size_{}", target.label(), operation.code(), size)
    }

    pub fn operand_count(&self) -> usize {
        self.operation.operand_count()
    }
}

/// Builds the ordered case list
pub struct CaseMatrix;

impl CaseMatrix {
    /// Enumerates operation, then target, then size ascending
    ///
    /// Duplicated axis entries are rejected, which keeps every name unique.
    pub fn build(
        operations: &[Operation],
        targets: &[Target],
        sizes: &[usize],
    ) -> BenchResult<Vec<BenchmarkCase>> {
        Self::validate_axes(operations, targets, sizes)?;

        let mut sorted_sizes = sizes.to_vec();
        sorted_sizes.sort_unstable();

        let mut cases = Vec::with_capacity(operations.len() * targets.len() * sizes.len());
        for &operation in operations {
            for target in targets {
                for &size in &sorted_sizes {
                    cases.push(BenchmarkCase::new(operation, *target, size));
                }
            }
        }

        debug_assert_eq!(
            cases.iter().map(|c| &c.name).collect::<HashSet<_>>().len(),
            cases.len()
        );
        Ok(cases)
    }

    /// Cases for a single operation over the fixed sweep
    pub fn for_operation(operation: Operation, targets: &[Target]) -> BenchResult<Vec<BenchmarkCase>> {
        Self::build(&[operation], targets, &SIZE_SWEEP)
    }

    /// Checks that every axis is non-empty, sizes are positive and nothing repeats
    pub fn validate_axes(
        operations: &[Operation],
        targets: &[Target],
        sizes: &[usize],
    ) -> Result<(), ConfigurationError> {
        ensure_non_empty("operations", operations)?;
        ensure_non_empty("targets", targets)?;
        ensure_non_empty("sizes", sizes)?;

        if let Some(&size) = sizes.iter().find(|&&size| size == 0) {
            return Err(ConfigurationError::InvalidSize { size });
        }

        ensure_unique("operations", operations)?;
        ensure_unique("targets", targets)?;
        ensure_unique("sizes", sizes)?;
        Ok(())
    }
}

fn ensure_non_empty<T>(field: &str, items: &[T]) -> Result<(), ConfigurationError> {
    if items.is_empty() {
        return Err(ConfigurationError::EmptyConfiguration {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn ensure_unique<T: Hash + Eq + Display>(field: &str, items: &[T]) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item) {
            return Err(ConfigurationError::DuplicateEntry {
                field: field.to_string(),
                entry: item.to_string(),
            });
        }
    }
    Ok(())
}
