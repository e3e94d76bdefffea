//! # Trajectory Sampling Configuration
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [trajectory]
//! v_start = 500.0
//! v_target = 0.0
//! a_limit = -10.0
//! j_limit = -1.0
//!
//! [sampler]
//! interval = 0.2
//!
//! [output]
//! format = "csv"
//! precision = 3
//! ```
//!
//! - `trajectory.convention = "magnitude"` accepts positive `a_limit`/`j_limit`.
//! - Missing sections and fields fall back to the defaults below.
//! - Trajectory values are never rejected here: a trajectory that cannot be
//!   planned simply reports completion on its first sample.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::{SamplerConfig, TrajectoryParams};
use crate::output::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration struct: one trajectory, how to sample it, how to print it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How `a_limit` and `j_limit` are signed.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LimitConvention {
    /// Limits are given as negative numbers
    #[default]
    Negative,
    /// Limits are given as positive magnitudes
    Magnitude,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrajectoryConfig {
    #[serde(default = "default_v_start")]
    pub v_start: f64,
    #[serde(default = "default_v_target")]
    pub v_target: f64,
    #[serde(default = "default_a_limit")]
    pub a_limit: f64,
    #[serde(default = "default_j_limit")]
    pub j_limit: f64,
    #[serde(default)]
    pub convention: LimitConvention,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            v_start: default_v_start(),
            v_target: default_v_target(),
            a_limit: default_a_limit(),
            j_limit: default_j_limit(),
            convention: LimitConvention::default(),
        }
    }
}

impl TrajectoryConfig {
    pub fn params(&self) -> TrajectoryParams {
        match self.convention {
            LimitConvention::Negative => {
                TrajectoryParams::new(self.v_start, self.v_target, self.a_limit, self.j_limit)
            }
            LimitConvention::Magnitude => TrajectoryParams::from_magnitudes(
                self.v_start,
                self.v_target,
                self.a_limit,
                self.j_limit,
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

const MAX_PRECISION: usize = 12;

impl Config {
    /// Validate sampling and output settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.sampler.interval;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sampler.interval must be > 0, got {}",
                interval
            )));
        }
        if self.sampler.max_samples == 0 {
            return Err(ConfigError::Invalid("sampler.max_samples must be > 0".to_string()));
        }
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "output.precision must be <= {}, got {}",
                MAX_PRECISION, self.output.precision
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_v_start() -> f64 { 500.0 }
fn default_v_target() -> f64 { 0.0 }
fn default_a_limit() -> f64 { -10.0 }
fn default_j_limit() -> f64 { -1.0 }
fn default_precision() -> usize { 2 }

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path, e);
            Err(ConfigError::Io(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.trajectory.v_start, 500.0);
        assert_eq!(config.trajectory.v_target, 0.0);
        assert_eq!(config.trajectory.a_limit, -10.0);
        assert_eq!(config.trajectory.j_limit, -1.0);
        assert_eq!(config.trajectory.convention, LimitConvention::Negative);
        assert_eq!(config.sampler.interval, 0.2);
        assert_eq!(config.sampler.max_samples, 1_000_000);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert_eq!(config.output.precision, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_success() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "[trajectory]\nv_start = 0.0\nv_target = 120.0\n\n[output]\nformat = 'json'").unwrap();
        file.flush().unwrap();
        let config = load_config(file_path.to_str().unwrap()).unwrap();
        assert_eq!(config.trajectory.v_start, 0.0);
        assert_eq!(config.trajectory.v_target, 120.0);
        assert_eq!(config.output.format, OutputFormat::Json);
        // Defaults for missing fields
        assert_eq!(config.trajectory.a_limit, -10.0);
        assert_eq!(config.sampler.interval, 0.2);
        assert_eq!(config.output.precision, 2);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent_file.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "not a valid toml").unwrap();
        file.flush().unwrap();
        let result = load_config(file_path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_magnitude_convention() {
        let toml = r#"
        [trajectory]
        v_start = 0.0
        v_target = 10.0
        a_limit = 4.0
        j_limit = 2.0
        convention = "magnitude"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let params = config.trajectory.params();
        assert_eq!(params, TrajectoryParams::new(0.0, 10.0, -4.0, -2.0));
        assert!(!params.is_degenerate());
    }

    #[test]
    fn test_validate_rejects_bad_sampler() {
        let mut config = Config::default();
        config.sampler.interval = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sampler.max_samples = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.output.precision = 13;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_degenerate_trajectory_still_validates() {
        let toml = r#"
        [trajectory]
        v_start = 3.0
        v_target = 3.0
        a_limit = 1.0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.trajectory.params().is_degenerate());
    }
}
