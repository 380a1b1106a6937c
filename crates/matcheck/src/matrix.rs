// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Dense matrix storage with validated dimensions.

use crate::errors::{MatrixCheckError, MatrixCheckResult};
use num_traits::{One, Zero};
use std::ops::Index;

/// A non-empty rectangular matrix stored as a single row-major buffer.
///
/// Rectangularity is checked once at construction, so every row has exactly
/// [`Matrix::cols`] entries and row access never goes through a per-row allocation.
///
/// # Example
///
/// ```
/// use matcheck::Matrix;
///
/// let matrix = Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// assert_eq!(matrix.rows(), 2);
/// assert_eq!(matrix.cols(), 2);
/// assert_eq!(matrix[(1, 0)], 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T = i64> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Creates a matrix from a list of rows, validating dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixCheckError::EmptyMatrix`] when there are no rows or the rows are
    /// empty, and [`MatrixCheckError::RaggedMatrix`] when rows have inconsistent lengths.
    pub fn new(rows: Vec<Vec<T>>) -> MatrixCheckResult<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(MatrixCheckError::EmptyMatrix);
        }

        let num_rows = rows.len();
        let mut data = Vec::with_capacity(num_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixCheckError::RaggedMatrix {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            rows: num_rows,
            cols,
        })
    }

    /// Creates a matrix from a row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<T>) -> MatrixCheckResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixCheckError::EmptyMatrix);
        }
        if data.len() != rows * cols {
            return Err(MatrixCheckError::dimension_mismatch(
                rows * cols,
                data.len(),
                format!("row-major buffer of a {rows}x{cols} matrix"),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.cols)
    }

    /// Returns the underlying row-major buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Zero + One + Clone> Matrix<T> {
    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> MatrixCheckResult<Self> {
        let mut data = vec![T::zero(); n * n];
        for i in 0..n {
            data[i * n + i] = T::one();
        }
        Self::from_flat(n, n, data)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.cols, "column {col} out of bounds for {} columns", self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = MatrixCheckError;

    fn try_from(rows: Vec<Vec<T>>) -> MatrixCheckResult<Self> {
        Matrix::new(rows)
    }
}

impl<T: Clone> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.iter_rows().map(<[T]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_row_major() {
        let m = Matrix::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert!(!m.is_square());
        assert_eq!(m.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(m.row(1), &[4, 5, 6]);
        assert_eq!(m[(0, 2)], 3);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            Matrix::<i64>::new(vec![]).unwrap_err(),
            MatrixCheckError::EmptyMatrix
        );
        assert_eq!(
            Matrix::<i64>::new(vec![vec![], vec![]]).unwrap_err(),
            MatrixCheckError::EmptyMatrix
        );
        assert_eq!(
            Matrix::<i64>::from_flat(0, 3, vec![]).unwrap_err(),
            MatrixCheckError::EmptyMatrix
        );
        assert_eq!(
            Matrix::<i64>::identity(0).unwrap_err(),
            MatrixCheckError::EmptyMatrix
        );
    }

    #[test]
    fn test_rejects_ragged() {
        let err = Matrix::new(vec![vec![1, 2], vec![3], vec![4, 5]]).unwrap_err();
        assert_eq!(
            err,
            MatrixCheckError::RaggedMatrix {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_flat_checks_length() {
        let err = Matrix::from_flat(2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            MatrixCheckError::DimensionMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_identity() {
        let id = Matrix::<i64>::identity(3).unwrap();
        let rows: Vec<Vec<i64>> = id.into();
        assert_eq!(rows, vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds_column() {
        let m = Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let _ = m[(0, 2)];
    }
}
