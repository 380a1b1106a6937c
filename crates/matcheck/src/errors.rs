// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for matrix product verification
//!
//! Malformed input is signaled through [`MatrixCheckError`]. A claimed product whose shape
//! cannot match `A · B` is *not* an error: the verifiers report it as
//! [`Verdict::Mismatch`](crate::Verdict::Mismatch).

use thiserror::Error;

/// Main error type for matrix verification operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixCheckError {
    /// A verifier received a non-square operand
    #[error("Matrix {name} must be square, got {rows}x{cols}")]
    NotSquare {
        name: &'static str,
        rows: usize,
        cols: usize,
    },

    /// Inner dimensions of a multiplication disagree
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A matrix needs at least one row and one column
    #[error("Matrix must have at least one row and one column")]
    EmptyMatrix,

    /// Rows of different lengths
    #[error("Ragged matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Modulus outside the supported range
    #[error("Invalid modulus: {modulus} - {reason}")]
    InvalidModulus { modulus: u64, reason: &'static str },

    /// Repeated verification needs at least one trial
    #[error("Number of trials must be at least 1")]
    InvalidTrials,

    /// Exact product does not fit the accumulator
    #[error("Arithmetic overflow while computing entry ({row}, {col}) of the exact product")]
    ArithmeticOverflow { row: usize, col: usize },

    /// Malformed batch input
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for matrix verification operations
pub type MatrixCheckResult<T> = Result<T, MatrixCheckError>;

impl From<figment::Error> for MatrixCheckError {
    fn from(err: figment::Error) -> Self {
        MatrixCheckError::Config {
            message: err.to_string(),
        }
    }
}

// Helper functions for creating errors with context
impl MatrixCheckError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize, context: impl Into<String>) -> Self {
        MatrixCheckError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create a parse error for a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        MatrixCheckError::Parse {
            line,
            message: message.into(),
        }
    }
}
