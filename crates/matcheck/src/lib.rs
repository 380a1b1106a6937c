// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Verification of claimed matrix products.
//!
//! Given square matrices `A`, `B` and a claimed product `C`, this crate decides whether
//! `A · B = C` in two independent ways:
//!
//! - [`verify_product_exact`] recomputes `A · B` in `O(n³)` and compares every entry. It is
//!   always correct and serves as the reference.
//! - [`verify_product`] runs Freivalds' check: for a prime `p` drawn from
//!   [`CANDIDATE_PRIMES`] and a random vector `x` over `Z_p` it compares `A · (B · x)` with
//!   `C · x` in `O(n²)`.
//!
//! ## Error Model
//!
//! Freivalds' check has one-sided error. A true product is always accepted; a wrong one is
//! accepted with probability at most `1/1621` per trial. [`verify_product_trials`] repeats
//! the check with fresh randomness to shrink the bound to `(1/1621)^k`.
//!
//! ```
//! use matcheck::{verify_product, verify_product_exact, Matrix, Verdict};
//!
//! let a = Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let b = Matrix::new(vec![vec![5, 6], vec![7, 8]]).unwrap();
//! let c = Matrix::new(vec![vec![19, 22], vec![43, 50]]).unwrap();
//!
//! assert_eq!(verify_product_exact(&a, &b, &c).unwrap(), Verdict::Match);
//! assert_eq!(verify_product(&a, &b, &c).unwrap(), Verdict::Match);
//! ```

pub mod batch;
pub mod config;
pub mod errors;
pub mod field;
pub mod math;
pub mod matrix;
pub mod runner;
pub mod verify;

// Re-export commonly used types for convenience
pub use batch::{parse_batch, TestCase};
pub use config::{ConfigOverrides, VerifierConfig};
pub use errors::{MatrixCheckError, MatrixCheckResult};
pub use field::{FieldSampler, CANDIDATE_PRIMES};
pub use math::{multiply_matrices, multiply_mod_p};
pub use matrix::Matrix;
pub use runner::{run_batch, run_case, CaseReport, MethodReport};
pub use verify::{
    false_positive_bound, verify_product, verify_product_exact, verify_product_trials,
    verify_product_with, Verdict,
};
