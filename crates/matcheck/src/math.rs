// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Modular and exact matrix arithmetic.
//!
//! [`multiply_mod_p`] is the `O(n²)` primitive behind the Freivalds check and
//! [`multiply_matrices`] is the exact `O(n³)` product used by the brute-force verifier.

use crate::errors::{MatrixCheckError, MatrixCheckResult};
use crate::matrix::Matrix;
use num_bigint::BigInt;
use tracing::trace;

/// Largest modulus accepted by [`multiply_mod_p`].
///
/// Entries are reduced into `[0, p)` before multiplying, so each product is below `p²`
/// and a row of `n` products stays below `n · p²`. With `p <= 2^32` the `u64`
/// accumulator is reduced after every addition that could overflow; for the field
/// primes used by the verifier (`p < 2^11`) no intermediate reduction ever triggers
/// for `n < 2^42`.
pub const MAX_MODULUS: u64 = 1 << 32;

/// Computes `(A · x) mod p`.
///
/// Entries of `A` may be any `i64`, negative values are mapped to their
/// least non-negative residue. Entries of `x` are reduced mod `p` as well.
/// The result has `A.rows()` entries, each in `[0, p)`.
///
/// # Errors
///
/// - [`MatrixCheckError::DimensionMismatch`] if `x.len() != A.cols()`
/// - [`MatrixCheckError::InvalidModulus`] if `p < 2` or `p > MAX_MODULUS`
pub fn multiply_mod_p(a: &Matrix, x: &[u64], p: u64) -> MatrixCheckResult<Vec<u64>> {
    if p < 2 {
        return Err(MatrixCheckError::InvalidModulus {
            modulus: p,
            reason: "modulus must be at least 2",
        });
    }
    if p > MAX_MODULUS {
        return Err(MatrixCheckError::InvalidModulus {
            modulus: p,
            reason: "modulus must not exceed 2^32",
        });
    }
    if x.len() != a.cols() {
        return Err(MatrixCheckError::dimension_mismatch(
            a.cols(),
            x.len(),
            "matrix-vector product (columns of A vs. length of x)",
        ));
    }

    let modulus = i128::from(p);
    let x: Vec<u64> = x.iter().map(|v| v % p).collect();

    let ax = a
        .iter_rows()
        .map(|row| {
            let mut acc: u64 = 0;
            for (a_ik, x_k) in row.iter().zip(&x) {
                // rem_euclid keeps the residue non-negative and fits in u64 since p <= 2^32
                let a_ik = i128::from(*a_ik).rem_euclid(modulus) as u64;
                let term = a_ik * x_k;
                acc = match acc.checked_add(term) {
                    Some(sum) => sum,
                    None => (acc % p) + term,
                };
            }
            acc % p
        })
        .collect();

    Ok(ax)
}

/// Computes the exact product `A · B` for `A` of size `m x n` and `B` of size `n x k`.
///
/// Products are accumulated in `i128`, which holds any single `i64 · i64` product.
/// An entry whose running sum leaves the `i128` range is recomputed with [`BigInt`],
/// so only entries whose final value does not fit are reported.
///
/// # Errors
///
/// - [`MatrixCheckError::DimensionMismatch`] if `A.cols() != B.rows()`
/// - [`MatrixCheckError::ArithmeticOverflow`] if an entry of the product does not fit in `i128`
pub fn multiply_matrices(a: &Matrix, b: &Matrix) -> MatrixCheckResult<Matrix<i128>> {
    if a.cols() != b.rows() {
        return Err(MatrixCheckError::dimension_mismatch(
            a.cols(),
            b.rows(),
            "matrix product (columns of A vs. rows of B)",
        ));
    }

    let (m, k) = (a.rows(), b.cols());
    // None marks an entry whose running sum overflowed
    let mut ab: Vec<Option<i128>> = vec![Some(0); m * k];

    for (i, a_row) in a.iter_rows().enumerate() {
        let ab_row = &mut ab[i * k..(i + 1) * k];
        for (a_il, b_row) in a_row.iter().zip(b.iter_rows()) {
            let a_il = i128::from(*a_il);
            for (cell, b_lj) in ab_row.iter_mut().zip(b_row) {
                *cell = cell.and_then(|acc| {
                    a_il.checked_mul(i128::from(*b_lj))
                        .and_then(|term| term.checked_add(acc))
                });
            }
        }
    }

    let ab = ab
        .into_iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Some(value) => Ok(value),
            None => wide_entry(a, b, idx / k, idx % k),
        })
        .collect::<MatrixCheckResult<Vec<_>>>()?;

    Matrix::from_flat(m, k, ab)
}

fn wide_entry(a: &Matrix, b: &Matrix, row: usize, col: usize) -> MatrixCheckResult<i128> {
    let sum: BigInt = a
        .row(row)
        .iter()
        .zip(b.iter_rows())
        .map(|(a_il, b_row)| BigInt::from(*a_il) * BigInt::from(b_row[col]))
        .sum();
    trace!(row, col, %sum, "product entry recomputed with arbitrary precision");
    i128::try_from(&sum).map_err(|_| MatrixCheckError::ArithmeticOverflow { row, col })
}
