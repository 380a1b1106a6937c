// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Verifiers for claimed products `A · B = C` of square matrices.
//!
//! Both verifiers require `A`, `B` and `C` to be square and fail with
//! [`MatrixCheckError::NotSquare`] otherwise. If `C` does not have the shape of `A · B`
//! the answer is [`Verdict::Mismatch`] without any further work: a wrongly shaped `C` is
//! conclusive evidence, not an error.

mod exact;
mod freivalds;

pub use exact::verify_product_exact;
pub use freivalds::{
    false_positive_bound, verify_product, verify_product_trials, verify_product_with,
};

use crate::errors::{MatrixCheckError, MatrixCheckResult};
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a product verification, rendered as `YES` / `NO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// `C` equals `A · B` (with certainty for the exact verifier, with high probability
    /// for Freivalds)
    #[serde(rename = "YES")]
    Match,
    /// `C` differs from `A · B`; always correct for both verifiers
    #[serde(rename = "NO")]
    Mismatch,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Match => write!(f, "YES"),
            Verdict::Mismatch => write!(f, "NO"),
        }
    }
}

fn ensure_square(matrix: &Matrix, name: &'static str) -> MatrixCheckResult<()> {
    if !matrix.is_square() {
        return Err(MatrixCheckError::NotSquare {
            name,
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    Ok(())
}

fn ensure_all_square(a: &Matrix, b: &Matrix, c: &Matrix) -> MatrixCheckResult<()> {
    ensure_square(a, "A")?;
    ensure_square(b, "B")?;
    ensure_square(c, "C")
}

/// Returns `true` when `C` has the shape of `A · B`.
fn has_product_shape(a: &Matrix, b: &Matrix, c: &Matrix) -> bool {
    if c.cols() != b.cols() || c.rows() != a.rows() {
        tracing::debug!(
            a_rows = a.rows(),
            b_cols = b.cols(),
            c_rows = c.rows(),
            c_cols = c.cols(),
            "claimed product has the wrong shape"
        );
        return false;
    }
    true
}
