//! Analysis Configuration
//! Tunables shared by the CLI and library callers, loadable from JSON.

use crate::report::DEFAULT_SAMPLE_ROWS;
use crate::stats::{DEFAULT_FORECAST_STEPS, SIGNIFICANCE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("significance_level must be in (0, 1), got {0}")]
    SignificanceLevel(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Points extrapolated past the last observation.
    pub forecast_steps: usize,
    /// p-value at or below which a t-test counts as significant.
    pub significance_level: f64,
    /// Rows sampled into summary requests.
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            forecast_steps: DEFAULT_FORECAST_STEPS,
            significance_level: SIGNIFICANCE_THRESHOLD,
            preview_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

impl AnalysisConfig {
    /// Parse JSON; omitted fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::SignificanceLevel(self.significance_level));
        }
        Ok(())
    }
}
