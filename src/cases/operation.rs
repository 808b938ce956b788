//! Benchmarked operation families.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense linear-algebra operation timed by a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `a · b`
    Multiply,
    /// `(((((a · b) · c) · d) · e) · f)`
    ChainMultiply,
    /// `a⁻¹`
    Invert,
}

impl Operation {
    /// Registration order of the operation families
    pub const ALL: [Operation; 3] = [
        Operation::Multiply,
        Operation::ChainMultiply,
        Operation::Invert,
    ];

    /// Number of square operands the operation consumes
    pub const fn operand_count(self) -> usize {
        match self {
            Operation::Multiply => 2,
            Operation::ChainMultiply => 6,
            Operation::Invert => 1,
        }
    }

    /// Short code used in case names
    pub const fn code(self) -> &'static str {
        match self {
            Operation::Multiply => "MM",
            Operation::ChainMultiply => "CM",
            Operation::Invert => "INV",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Operation::Multiply => "multiplication of 2 random square matrices",
            Operation::ChainMultiply => "chained multiplication of 6 random square matrices",
            Operation::Invert => "inversion of 1 random square matrix",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
