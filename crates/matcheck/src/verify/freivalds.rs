// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Freivalds' randomized product check.
//!
//! For a random vector `x` over `Z_p` the check compares `A · (B · x)` with `C · x`,
//! which costs three matrix-vector products instead of a full matrix product.
//!
//! ## Error model
//!
//! If `A · B = C` then `A · (B · x) = C · x` for every `x`, so a true product is never
//! rejected. If `A · B ≠ C` the check only passes when `x` falls in the kernel of
//! `(A · B - C) mod p`, which happens with probability at most `1/p <= 1/1621`.
//! A [`Verdict::Mismatch`] is therefore always correct, while a [`Verdict::Match`] is
//! correct with high probability. Running `k` independent trials with fresh `p` and `x`
//! lowers the bound to `(1/1621)^k`, see [`verify_product_trials`].
//!
//! The bound assumes `A · B - C` is non-zero modulo the sampled prime. A difference whose
//! entries are all multiples of `p` vanishes in `Z_p`; one divisible by every prime in
//! [`CANDIDATE_PRIMES`](crate::field::CANDIDATE_PRIMES) is never detected. The bound holds
//! whenever some non-zero entry of the difference is below `1621` in absolute value.

use super::{ensure_all_square, has_product_shape, Verdict};
use crate::errors::{MatrixCheckError, MatrixCheckResult};
use crate::field::{FieldSampler, MIN_CANDIDATE_PRIME};
use crate::math::multiply_mod_p;
use crate::matrix::Matrix;
use tracing::{debug, trace};

/// Checks `A · B = C` with a single Freivalds trial using a freshly seeded sampler.
///
/// # Errors
///
/// - [`MatrixCheckError::NotSquare`] if any operand is not square
/// - [`MatrixCheckError::DimensionMismatch`] if `A.cols() != B.rows()`
pub fn verify_product(a: &Matrix, b: &Matrix, c: &Matrix) -> MatrixCheckResult<Verdict> {
    verify_product_with(&mut FieldSampler::from_entropy(), a, b, c)
}

/// Checks `A · B = C` with a single Freivalds trial drawing from `sampler`.
pub fn verify_product_with(
    sampler: &mut FieldSampler,
    a: &Matrix,
    b: &Matrix,
    c: &Matrix,
) -> MatrixCheckResult<Verdict> {
    verify_product_trials(sampler, a, b, c, 1)
}

/// Runs `trials` independent Freivalds trials and reports [`Verdict::Match`] only if all
/// of them match. Stops at the first mismatch.
///
/// # Errors
///
/// Same as [`verify_product`], plus [`MatrixCheckError::InvalidTrials`] when `trials == 0`.
pub fn verify_product_trials(
    sampler: &mut FieldSampler,
    a: &Matrix,
    b: &Matrix,
    c: &Matrix,
    trials: u32,
) -> MatrixCheckResult<Verdict> {
    if trials == 0 {
        return Err(MatrixCheckError::InvalidTrials);
    }

    ensure_all_square(a, b, c)?;
    if a.cols() != b.rows() {
        return Err(MatrixCheckError::dimension_mismatch(
            a.cols(),
            b.rows(),
            "product A · B (columns of A vs. rows of B)",
        ));
    }
    if !has_product_shape(a, b, c) {
        return Ok(Verdict::Mismatch);
    }

    for trial in 0..trials {
        let p = sampler.sample_prime();
        let x = sampler.sample_vector(a.rows(), p);
        trace!(trial, p, n = a.rows(), "running Freivalds trial");

        if !single_trial(a, b, c, &x, p)? {
            debug!(trial, p, "Freivalds trial rejected the claimed product");
            return Ok(Verdict::Mismatch);
        }
    }

    debug!(trials, n = a.rows(), "claimed product passed every Freivalds trial");
    Ok(Verdict::Match)
}

/// Upper bound on the probability that `trials` independent trials all accept a wrong
/// product.
pub fn false_positive_bound(trials: u32) -> f64 {
    (MIN_CANDIDATE_PRIME as f64).recip().powf(f64::from(trials))
}

fn single_trial(a: &Matrix, b: &Matrix, c: &Matrix, x: &[u64], p: u64) -> MatrixCheckResult<bool> {
    let bx = multiply_mod_p(b, x, p)?;
    let abx = multiply_mod_p(a, &bx, p)?;
    let cx = multiply_mod_p(c, x, p)?;
    Ok(abx == cx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<i64>>) -> Matrix {
        Matrix::new(rows).unwrap()
    }

    #[test]
    fn test_single_trial_detects_known_witness() {
        let a = matrix(vec![vec![1, 2], vec![3, 4]]);
        let b = matrix(vec![vec![5, 6], vec![7, 8]]);
        let good = matrix(vec![vec![19, 22], vec![43, 50]]);
        let bad = matrix(vec![vec![19, 22], vec![43, 51]]);

        assert!(single_trial(&a, &b, &good, &[1, 1], 1621).unwrap());
        // x = [0, 1] exposes the perturbed column
        assert!(!single_trial(&a, &b, &bad, &[0, 1], 1621).unwrap());
        // x = [1, 0] lies in the kernel of AB - C
        assert!(single_trial(&a, &b, &bad, &[1, 0], 1621).unwrap());
    }

    #[test]
    fn test_zero_trials_rejected() {
        let id = Matrix::<i64>::identity(2).unwrap();
        let mut sampler = FieldSampler::from_seed(1);
        assert_eq!(
            verify_product_trials(&mut sampler, &id, &id, &id, 0).unwrap_err(),
            MatrixCheckError::InvalidTrials
        );
    }

    #[test]
    fn test_inner_dimension_mismatch_is_signaled() {
        let two = Matrix::<i64>::identity(2).unwrap();
        let three = Matrix::<i64>::identity(3).unwrap();
        assert!(matches!(
            verify_product(&two, &three, &two),
            Err(MatrixCheckError::DimensionMismatch {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_false_positive_bound() {
        assert_eq!(false_positive_bound(0), 1.0);
        assert!((false_positive_bound(1) - 1.0 / 1621.0).abs() < 1e-15);
        assert!(false_positive_bound(3) < 1e-9);
    }

    #[test]
    fn test_repeated_trials_reject_scaled_identity() {
        let a = matrix(vec![vec![2, 0], vec![0, 2]]);
        let b = Matrix::<i64>::identity(2).unwrap();
        let c = matrix(vec![vec![3, 0], vec![0, 3]]);
        // (AB - C) = -I has a trivial kernel, only x = 0 can hide the difference
        let mut sampler = FieldSampler::from_seed(17);
        let mismatches = (0..200)
            .filter(|_| {
                verify_product_trials(&mut sampler, &a, &b, &c, 5).unwrap() == Verdict::Mismatch
            })
            .count();
        assert_eq!(mismatches, 200);
    }
}
