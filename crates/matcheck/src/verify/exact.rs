// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use super::{ensure_all_square, has_product_shape, Verdict};
use crate::errors::{MatrixCheckError, MatrixCheckResult};
use crate::math::multiply_matrices;
use crate::matrix::Matrix;
use tracing::debug;

/// Checks `A · B = C` by computing the full product and comparing every entry.
///
/// Deterministic and always correct, at `O(n³)` cost. An entry of `A · B` outside the
/// `i128` range cannot equal an `i64` entry of `C` and is reported as a mismatch.
///
/// # Errors
///
/// [`MatrixCheckError::NotSquare`] if any operand is not square
pub fn verify_product_exact(a: &Matrix, b: &Matrix, c: &Matrix) -> MatrixCheckResult<Verdict> {
    ensure_all_square(a, b, c)?;
    if !has_product_shape(a, b, c) {
        return Ok(Verdict::Mismatch);
    }

    let ab = match multiply_matrices(a, b) {
        Ok(ab) => ab,
        Err(MatrixCheckError::ArithmeticOverflow { row, col }) => {
            debug!(row, col, "exact product entry exceeds the range of the claimed product");
            return Ok(Verdict::Mismatch);
        }
        Err(e) => return Err(e),
    };
    let mismatch = ab
        .as_slice()
        .iter()
        .zip(c.as_slice())
        .position(|(ab_ij, c_ij)| *ab_ij != i128::from(*c_ij));

    match mismatch {
        Some(idx) => {
            debug!(
                row = idx / c.cols(),
                col = idx % c.cols(),
                "exact product differs from the claimed product"
            );
            Ok(Verdict::Mismatch)
        }
        None => Ok(Verdict::Match),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<i64>>) -> Matrix {
        Matrix::new(rows).unwrap()
    }

    #[test]
    fn test_exact_match_and_mismatch() {
        let a = matrix(vec![vec![1, 2], vec![3, 4]]);
        let b = matrix(vec![vec![5, 6], vec![7, 8]]);
        let good = matrix(vec![vec![19, 22], vec![43, 50]]);
        let bad = matrix(vec![vec![19, 22], vec![43, 51]]);

        assert_eq!(verify_product_exact(&a, &b, &good).unwrap(), Verdict::Match);
        assert_eq!(
            verify_product_exact(&a, &b, &bad).unwrap(),
            Verdict::Mismatch
        );
    }

    #[test]
    fn test_exact_does_not_confuse_congruent_entries() {
        // C is congruent to AB modulo every field prime, only exact comparison sees it
        let a = matrix(vec![vec![1]]);
        let b = matrix(vec![vec![1]]);
        let c = matrix(vec![vec![1 + 1621 * 1801 * 1879 * 1907 * 1987]]);
        assert_eq!(verify_product_exact(&a, &b, &c).unwrap(), Verdict::Mismatch);
    }

    #[test]
    fn test_exact_inner_mismatch_is_a_shape_mismatch() {
        // With square operands, a differing inner dimension always shows up as a
        // wrongly shaped C first
        let two = Matrix::<i64>::identity(2).unwrap();
        let three = Matrix::<i64>::identity(3).unwrap();
        assert_eq!(
            verify_product_exact(&two, &three, &two).unwrap(),
            Verdict::Mismatch
        );
    }

    #[test]
    fn test_exact_not_square() {
        let wide = matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let id = Matrix::<i64>::identity(2).unwrap();
        assert!(matches!(
            verify_product_exact(&wide, &id, &id),
            Err(MatrixCheckError::NotSquare { name: "A", .. })
        ));
    }

    #[test]
    fn test_exact_out_of_range_entry_is_a_mismatch() {
        // Every entry of AB is 2^127, one past i128::MAX
        let big = matrix(vec![vec![i64::MIN, i64::MIN], vec![i64::MIN, i64::MIN]]);
        assert_eq!(
            verify_product_exact(&big, &big, &big).unwrap(),
            Verdict::Mismatch
        );
    }

    #[test]
    fn test_exact_matches_despite_intermediate_overflow() {
        let mut a = vec![vec![0; 5]; 5];
        a[0] = vec![i64::MIN; 5];
        let mut b = vec![vec![0; 5]; 5];
        for (row, value) in b.iter_mut().zip([i64::MIN, i64::MIN, i64::MAX, i64::MAX, 2]) {
            row[0] = value;
        }
        let (a, b) = (matrix(a), matrix(b));
        let zero = matrix(vec![vec![0; 5]; 5]);

        assert_eq!(verify_product_exact(&a, &b, &zero).unwrap(), Verdict::Match);
        assert_eq!(crate::verify_product(&a, &b, &zero).unwrap(), Verdict::Match);

        let mut off = vec![vec![0; 5]; 5];
        off[0][0] = 1;
        assert_eq!(
            verify_product_exact(&a, &b, &matrix(off)).unwrap(),
            Verdict::Mismatch
        );
    }
}
