// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Batch test file parsing.
//!
//! A batch file starts with the number of test cases. Each case is a line holding the
//! dimension `n` followed by `3n` rows of whitespace-separated integers: the rows of `A`,
//! then `B`, then `C`. Blank lines are ignored.
//!
//! ```text
//! 1
//! 2
//! 1 2
//! 3 4
//! 5 6
//! 7 8
//! 19 22
//! 43 50
//! ```

use crate::errors::{MatrixCheckError, MatrixCheckResult};
use crate::matrix::Matrix;
use std::iter::Peekable;
use tracing::warn;

/// One `(A, B, C)` triple read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// 1-based position in the batch
    pub index: usize,
    /// Dimension announced in the file
    pub n: usize,
    pub a: Matrix,
    pub b: Matrix,
    pub c: Matrix,
}

/// Parses a whole batch file.
///
/// Rows are taken as written: a row whose length differs from `n` on every line yields a
/// rectangular matrix and is reported later by the verifiers as not square.
///
/// # Errors
///
/// - [`MatrixCheckError::Parse`] for malformed numbers, a zero dimension or missing lines
/// - [`MatrixCheckError::RaggedMatrix`] when the rows of one matrix differ in length
pub fn parse_batch(input: &str) -> MatrixCheckResult<Vec<TestCase>> {
    let eof = input.lines().count() + 1;
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let (line_no, count_line) = next_line(&mut lines, eof, "the number of test cases")?;
    let count = parse_count(line_no, count_line, "number of test cases")?;

    // count and n come from the file, so nothing is pre-allocated from them
    let mut cases = Vec::new();
    for index in 1..=count {
        let (line_no, n_line) = next_line(
            &mut lines,
            eof,
            &format!("dimension of test case {index}"),
        )?;
        let n = parse_count(line_no, n_line, "matrix dimension")?;
        if n == 0 {
            return Err(MatrixCheckError::parse(
                line_no,
                "matrix dimension must be positive",
            ));
        }

        let a = read_matrix(&mut lines, eof, n, index, "A")?;
        let b = read_matrix(&mut lines, eof, n, index, "B")?;
        let c = read_matrix(&mut lines, eof, n, index, "C")?;
        cases.push(TestCase { index, n, a, b, c });
    }

    if let Some((line_no, _)) = lines.peek() {
        warn!(line = line_no, "ignoring trailing input after the last test case");
    }

    Ok(cases)
}

fn next_line<'a, I>(
    lines: &mut Peekable<I>,
    eof: usize,
    expected: &str,
) -> MatrixCheckResult<(usize, &'a str)>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    lines.next().ok_or_else(|| {
        MatrixCheckError::parse(eof, format!("unexpected end of input, expected {expected}"))
    })
}

fn parse_count(line_no: usize, line: &str, what: &str) -> MatrixCheckResult<usize> {
    line.parse::<usize>()
        .map_err(|e| MatrixCheckError::parse(line_no, format!("invalid {what} '{line}': {e}")))
}

fn read_matrix<'a, I>(
    lines: &mut Peekable<I>,
    eof: usize,
    n: usize,
    index: usize,
    name: &str,
) -> MatrixCheckResult<Matrix>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut rows = Vec::new();
    for r in 0..n {
        let (line_no, line) = next_line(
            lines,
            eof,
            &format!("row {} of matrix {name} in test case {index}", r + 1),
        )?;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|e| {
                    MatrixCheckError::parse(line_no, format!("invalid integer '{token}': {e}"))
                })
            })
            .collect::<MatrixCheckResult<Vec<_>>>()?;
        rows.push(row);
    }
    Matrix::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_CASES: &str = "2
2
1 2
3 4
5 6
7 8
19 22
43 50

1
-3
4
-12
";

    #[test]
    fn test_parse_two_cases() {
        let cases = parse_batch(TWO_CASES).unwrap();
        assert_eq!(cases.len(), 2);

        let first = &cases[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.n, 2);
        assert_eq!(first.a, Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap());
        assert_eq!(first.c, Matrix::new(vec![vec![19, 22], vec![43, 50]]).unwrap());

        let second = &cases[1];
        assert_eq!(second.index, 2);
        assert_eq!(second.a, Matrix::new(vec![vec![-3]]).unwrap());
        assert_eq!(second.c, Matrix::new(vec![vec![-12]]).unwrap());
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let cases = parse_batch("\n  1 \n1\n 2 \n\n3\n  6\t\n").unwrap();
        assert_eq!(cases[0].c, Matrix::new(vec![vec![6]]).unwrap());
    }

    #[test]
    fn test_parse_bad_integer_reports_line() {
        let err = parse_batch("1\n1\n2\nx\n4\n").unwrap_err();
        assert!(matches!(err, MatrixCheckError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_parse_zero_dimension() {
        let err = parse_batch("1\n0\n").unwrap_err();
        assert!(matches!(err, MatrixCheckError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_parse_truncated_input() {
        let err = parse_batch("1\n2\n1 2\n3 4\n5 6\n").unwrap_err();
        match err {
            MatrixCheckError::Parse { line, message } => {
                assert_eq!(line, 6);
                assert!(message.contains("row 2 of matrix B in test case 1"), "{message}")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_huge_counts_run_out_of_input() {
        let err = parse_batch("100000000000000000\n1\n1\n1\n1\n").unwrap_err();
        match err {
            MatrixCheckError::Parse { line, message } => {
                assert_eq!(line, 6);
                assert!(message.contains("dimension of test case 2"), "{message}")
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_batch("1\n100000000000000000\n1\n").unwrap_err();
        assert!(matches!(err, MatrixCheckError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_parse_ragged_rows() {
        let err = parse_batch("1\n2\n1 2\n3\n1 0\n0 1\n1 2\n3 4\n").unwrap_err();
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
    fn test_parse_keeps_rectangular_rows() {
        // n = 2 but every row has three entries
        let cases = parse_batch("1\n2\n1 2 3\n4 5 6\n1 2 3\n4 5 6\n1 2 3\n4 5 6\n").unwrap();
        assert_eq!(cases[0].a.cols(), 3);
        assert!(!cases[0].a.is_square());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            parse_batch("").unwrap_err(),
            MatrixCheckError::Parse { line: 1, .. }
        ));
    }
}
