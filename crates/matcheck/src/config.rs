// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{MatrixCheckError, MatrixCheckResult};
use crate::field::FieldSampler;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables read by [`VerifierConfig::load`], e.g. `MATCHECK_TRIALS`.
pub const ENV_PREFIX: &str = "MATCHECK_";

/// Keys taken from the environment; other `MATCHECK_*` variables are left alone.
const ENV_KEYS: [&str; 2] = ["trials", "seed"];

/// Settings for a verification run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct VerifierConfig {
    /// Independent Freivalds trials per test case
    pub trials: u32,
    /// Seed for a reproducible sampler, fresh OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            trials: 1,
            seed: None,
        }
    }
}

/// Value struct for passing configuration from the cli to the configuration
#[derive(Default, Serialize, Deserialize, Clone, Debug)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl VerifierConfig {
    /// Layers defaults, the optional YAML file, `MATCHECK_*` environment variables and
    /// the overrides, later sources winning.
    ///
    /// # Errors
    ///
    /// [`MatrixCheckError::Config`] if the file is missing, a value cannot be parsed or the
    /// result fails validation.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> MatrixCheckResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(VerifierConfig::default()));

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(MatrixCheckError::Config {
                    message: format!("configuration file not found: {}", path.display()),
                });
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: VerifierConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).only(&ENV_KEYS))
            .merge(Serialized::defaults(overrides))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MatrixCheckResult<()> {
        if self.trials == 0 {
            return Err(MatrixCheckError::Config {
                message: "trials must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the sampler described by this configuration.
    pub fn sampler(&self) -> FieldSampler {
        match self.seed {
            Some(seed) => FieldSampler::from_seed(seed),
            None => FieldSampler::from_entropy(),
        }
    }
}
