// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::telemetry::setup_simple_tracing;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use matcheck::{parse_batch, run_batch, CaseReport, ConfigOverrides, VerifierConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "matcheck", version)]
#[command(about = "Check claimed matrix products A·B = C by exact recomputation and by Freivalds' algorithm", long_about = None)]
pub struct Cli {
    /// Batch file: number of test cases, then for each case n followed by the rows of A, B and C
    #[arg(default_value = "in6.txt")]
    input: PathBuf,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Independent Freivalds trials per test case
    #[arg(short, long)]
    trials: Option<u32>,

    /// Seed the sampler for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print the reports as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `matcheck -vvv` will give
    /// you trace level output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose"
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    fn load_config(&self) -> Result<VerifierConfig> {
        let overrides = ConfigOverrides {
            trials: self.trials,
            seed: self.seed,
        };
        VerifierConfig::load(self.config.as_deref(), &overrides)
            .context("Could not load configuration")
    }

    #[instrument(skip_all)]
    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        let config = self.load_config()?;
        info!(trials = config.trials, seeded = config.seed.is_some(), "configuration loaded");

        let start = Instant::now();
        let contents = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Could not read batch file {}", self.input.display()))?;
        let read_time = start.elapsed();

        let cases = parse_batch(&contents)
            .with_context(|| format!("Could not parse batch file {}", self.input.display()))?;
        info!(cases = cases.len(), "batch loaded");

        let reports = run_batch(&cases, &config).context("Verification failed")?;

        if self.json {
            print_json(read_time.as_secs_f64(), &reports)?;
        } else {
            println!("Read time: {} \n", read_time.as_secs_f64());
            for report in &reports {
                println!("{report}");
            }
        }

        Ok(())
    }
}

fn print_json(read_secs: f64, reports: &[CaseReport]) -> Result<()> {
    let output = serde_json::json!({
        "read_secs": read_secs,
        "cases": reports,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
