//! Tunable constants for weight synthesis and graph loading.
//!
//! `SafetyConfig` is a plain value passed explicitly to the components that
//! need it; there is no process-wide configuration.  The defaults reproduce
//! the production Chicago build.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Crime penalty added per incident at either endpoint of an edge.
pub const DEFAULT_PENALTY_FACTOR: f64 = 20.0;

/// Length (metres) assumed for an edge whose `length` is missing or malformed.
pub const DEFAULT_LENGTH_M: f64 = 10.0;

/// Multiplier applied to `length` when an edge has no usable `safety_weight`.
pub const DEFAULT_SAFETY_MULTIPLIER: f64 = 1.5;

/// Road class assigned when an edge carries no `highway` tag.
pub const DEFAULT_HIGHWAY: &str = "unclassified";

/// Weight-building and load-boundary settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Penalty per crime incident mapped to an edge endpoint.
    pub penalty_factor: f64,
    /// Fallback edge length in metres.
    pub default_length_m: f64,
    /// Fallback `safety_weight = length × default_safety_multiplier`.
    pub default_safety_multiplier: f64,
    /// Fallback road class.
    pub default_highway: String,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            penalty_factor:            DEFAULT_PENALTY_FACTOR,
            default_length_m:          DEFAULT_LENGTH_M,
            default_safety_multiplier: DEFAULT_SAFETY_MULTIPLIER,
            default_highway:           DEFAULT_HIGHWAY.to_owned(),
        }
    }
}

impl SafetyConfig {
    /// Read a JSON config file.  Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg: SafetyConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Builder-style override of the penalty factor.
    pub fn with_penalty_factor(mut self, penalty_factor: f64) -> Self {
        self.penalty_factor = penalty_factor;
        self
    }

    /// Reject values that would break the `safety_weight ≥ length ≥ 0`
    /// invariant the shortest-path searches rely on.
    pub fn validate(&self) -> CoreResult<()> {
        let checks = [
            ("penalty_factor", self.penalty_factor),
            ("default_length_m", self.default_length_m),
        ];
        for (name, v) in checks {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a finite non-negative number, got {v}"
                )));
            }
        }
        if !self.default_safety_multiplier.is_finite() || self.default_safety_multiplier < 1.0 {
            return Err(CoreError::Config(format!(
                "default_safety_multiplier must be finite and >= 1.0, got {}",
                self.default_safety_multiplier
            )));
        }
        Ok(())
    }

    /// Default `safety_weight` for an edge of the given length.
    #[inline]
    pub fn default_safety_weight(&self, length_m: f64) -> f64 {
        length_m * self.default_safety_multiplier
    }
}
