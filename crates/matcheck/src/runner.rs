// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Runs both verifiers over batch test cases and records their verdicts and timings.

use crate::batch::TestCase;
use crate::config::VerifierConfig;
use crate::errors::MatrixCheckResult;
use crate::field::FieldSampler;
use crate::verify::{verify_product_exact, verify_product_trials, Verdict};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Verdict and wall time of one verification method
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodReport {
    pub verdict: Verdict,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

/// Outcome of running both verifiers on one test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    /// 1-based position in the batch
    pub index: usize,
    pub n: usize,
    /// Brute-force recomputation
    pub exact: MethodReport,
    /// Freivalds check
    pub freivalds: MethodReport,
    /// Freivalds trials run for this case
    pub trials: u32,
}

impl CaseReport {
    /// `true` when the two methods disagree, which can only be a Freivalds false positive.
    pub fn verdicts_disagree(&self) -> bool {
        self.exact.verdict != self.freivalds.verdict
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

fn timed<T>(f: impl FnOnce() -> MatrixCheckResult<T>) -> MatrixCheckResult<(T, Duration)> {
    let start = Instant::now();
    let value = f()?;
    Ok((value, start.elapsed()))
}

/// Runs the exact verifier and then `trials` Freivalds trials on one test case.
#[instrument(skip_all, fields(case = case.index, n = case.n))]
pub fn run_case(
    case: &TestCase,
    sampler: &mut FieldSampler,
    trials: u32,
) -> MatrixCheckResult<CaseReport> {
    let (exact, exact_elapsed) = timed(|| verify_product_exact(&case.a, &case.b, &case.c))?;
    let (freivalds, freivalds_elapsed) =
        timed(|| verify_product_trials(sampler, &case.a, &case.b, &case.c, trials))?;

    let report = CaseReport {
        index: case.index,
        n: case.n,
        exact: MethodReport {
            verdict: exact,
            elapsed: exact_elapsed,
        },
        freivalds: MethodReport {
            verdict: freivalds,
            elapsed: freivalds_elapsed,
        },
        trials,
    };

    if report.verdicts_disagree() {
        warn!(
            exact = %exact,
            freivalds = %freivalds,
            "Freivalds check accepted a wrong product"
        );
    } else {
        info!(
            verdict = %exact,
            exact_secs = exact_elapsed.as_secs_f64(),
            freivalds_secs = freivalds_elapsed.as_secs_f64(),
            "verified test case"
        );
    }

    Ok(report)
}

/// Runs every test case with a sampler built from `config`, stopping at the first error.
pub fn run_batch(cases: &[TestCase], config: &VerifierConfig) -> MatrixCheckResult<Vec<CaseReport>> {
    config.validate()?;
    let mut sampler = config.sampler();
    cases
        .iter()
        .map(|case| run_case(case, &mut sampler, config.trials))
        .collect()
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test {}:", self.index)?;
        writeln!(f, "Matrices multiplication: ")?;
        writeln!(f, " Result: {}", self.exact.verdict)?;
        writeln!(f, " Time: {}", self.exact.elapsed.as_secs_f64())?;
        writeln!(f, "Random vector method: ")?;
        writeln!(f, " Result: {}", self.freivalds.verdict)?;
        writeln!(f, " Time: {} ", self.freivalds.elapsed.as_secs_f64())
    }
}
