//! CLI configuration management.
//!
//! Handles loading of the sweep configuration from TOML files with
//! environment variable override support. Every field has a default, so an
//! empty file (or no file at all) reproduces the reference sweep.

use std::path::{Path, PathBuf};

use pricer_pricing::lattice::{OscillationScheme, TreeType, MAX_STEPS};
use serde::Deserialize;
use thiserror::Error;

use crate::scenario::ScenarioConfig;

/// Step range and lattice settings of a sweep
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First step count (inclusive)
    pub min_steps: usize,

    /// Last step count (exclusive)
    pub max_steps: usize,

    /// Tree construction policy
    pub tree: TreeType,

    /// Scheme of the oscillation-resolving variant
    pub smoothing: OscillationScheme,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_steps: 3,
            max_steps: 600,
            tree: TreeType::AdditiveEqp,
            smoothing: OscillationScheme::BlackScholesSmoothing,
        }
    }
}

/// Where sweep results are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the data files
    pub dir: PathBuf,

    /// Data file of the oscillation-resolving sweep
    pub oscillating_file: PathBuf,

    /// Data file of the plain sweep
    pub plain_file: PathBuf,

    /// Optional CSV comparing both sweeps step by step
    pub summary: Option<PathBuf>,

    /// Print the console table
    pub table: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            oscillating_file: PathBuf::from("data_cpp4.txt"),
            plain_file: PathBuf::from("data_cpp2.txt"),
            summary: None,
            table: true,
        }
    }
}

impl OutputConfig {
    /// Full path of the oscillation-resolving sweep's data file
    pub fn oscillating_path(&self) -> PathBuf {
        self.dir.join(&self.oscillating_file)
    }

    /// Full path of the plain sweep's data file
    pub fn plain_path(&self) -> PathBuf {
        self.dir.join(&self.plain_file)
    }

    /// Full path of the comparison CSV, if requested
    pub fn summary_path(&self) -> Option<PathBuf> {
        self.summary.as_ref().map(|s| self.dir.join(s))
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    pub log_level: String,

    /// Market scenario
    pub scenario: ScenarioConfig,

    /// Sweep settings
    pub sweep: SweepConfig,

    /// Output settings
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            scenario: ScenarioConfig::default(),
            sweep: SweepConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if it exists, otherwise the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(dir) = std::env::var("LATTICE_SWEEP_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        if let Ok(log_level) = std::env::var("LATTICE_SWEEP_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        let sweep = &self.sweep;
        if sweep.min_steps >= sweep.max_steps {
            errors.push(format!(
                "Empty step range [{}, {})",
                sweep.min_steps, sweep.max_steps
            ));
        }

        let minimum = OscillationScheme::None
            .min_steps()
            .max(sweep.smoothing.min_steps());
        if sweep.min_steps < minimum {
            errors.push(format!(
                "min_steps {} below the minimum of {} for {}",
                sweep.min_steps, minimum, sweep.smoothing
            ));
        }

        if sweep.max_steps > MAX_STEPS + 1 {
            errors.push(format!(
                "max_steps {} exceeds maximum allowed ({})",
                sweep.max_steps,
                MAX_STEPS + 1
            ));
        }

        if !sweep.smoothing.is_smoothed() {
            errors.push("smoothing must name an oscillation-resolving scheme".to_string());
        }

        let output = &self.output;
        if output.oscillating_file.as_os_str().is_empty()
            || output.plain_file.as_os_str().is_empty()
        {
            errors.push("output file names cannot be empty".to_string());
        } else if output.oscillating_path() == output.plain_path() {
            errors.push(format!(
                "Both sweeps would write {}",
                output.plain_path().display()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Pillar;

    fn validation_errors(config: &AppConfig) -> Vec<String> {
        match config.validate() {
            Err(ConfigError::Validation(errors)) => errors,
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.sweep.min_steps, 3);
        assert_eq!(config.sweep.max_steps, 600);
        assert_eq!(config.sweep.tree, TreeType::AdditiveEqp);
        assert_eq!(config.output.oscillating_path(), PathBuf::from("./data_cpp4.txt"));
        assert_eq!(config.output.plain_path(), PathBuf::from("./data_cpp2.txt"));
        assert!(config.output.summary_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.scenario.strike, 40.0);
        assert_eq!(config.sweep.smoothing, OscillationScheme::BlackScholesSmoothing);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [scenario]
            spot = 38.5
            volatilities = [
                { months = 3, value = 0.18 },
                { months = 12, value = 0.22 },
            ]

            [sweep]
            max_steps = 50
            tree = "crr"
            smoothing = "bbsr"

            [output]
            dir = "out"
            summary = "summary.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.scenario.spot, 38.5);
        assert_eq!(config.scenario.strike, 40.0);
        assert_eq!(config.scenario.volatilities[1], Pillar::new(12, 0.22));
        assert_eq!(config.sweep.min_steps, 3);
        assert_eq!(config.sweep.max_steps, 50);
        assert_eq!(config.sweep.tree, TreeType::CoxRossRubinstein);
        assert_eq!(config.sweep.smoothing, OscillationScheme::RichardsonSmoothing);
        assert_eq!(config.output.summary_path(), Some(PathBuf::from("out/summary.csv")));
        assert_eq!(config.output.plain_path(), PathBuf::from("out/data_cpp2.txt"));
    }

    #[test]
    fn test_malformed_toml() {
        let result = AppConfig::from_toml("[sweep]\nmin_steps = \"three\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
        let config = AppConfig::load_or_default(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config.sweep.max_steps, 600);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("LATTICE_SWEEP_OUTPUT_DIR", "/tmp/lattice");
        std::env::set_var("LATTICE_SWEEP_LOG_LEVEL", "trace");
        let config = AppConfig::default().with_env_override();
        std::env::remove_var("LATTICE_SWEEP_OUTPUT_DIR");
        std::env::remove_var("LATTICE_SWEEP_LOG_LEVEL");

        assert_eq!(config.output.dir, PathBuf::from("/tmp/lattice"));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();
        assert!(validation_errors(&config).iter().any(|e| e.contains("log_level")));
    }

    #[test]
    fn test_validate_step_range() {
        let mut config = AppConfig::default();
        config.sweep.min_steps = 600;
        assert!(validation_errors(&config).iter().any(|e| e.contains("Empty step range")));

        let mut config = AppConfig::default();
        config.sweep.min_steps = 2;
        assert!(validation_errors(&config).iter().any(|e| e.contains("min_steps")));

        let mut config = AppConfig::default();
        config.sweep.min_steps = 5;
        config.sweep.smoothing = OscillationScheme::RichardsonSmoothing;
        assert!(validation_errors(&config).iter().any(|e| e.contains("minimum of 6")));

        let mut config = AppConfig::default();
        config.sweep.max_steps = MAX_STEPS + 2;
        assert!(validation_errors(&config).iter().any(|e| e.contains("exceeds maximum")));
    }

    #[test]
    fn test_validate_smoothing_scheme() {
        let mut config = AppConfig::default();
        config.sweep.smoothing = OscillationScheme::None;
        assert!(validation_errors(&config).iter().any(|e| e.contains("smoothing")));
    }

    #[test]
    fn test_validate_output_files_distinct() {
        let mut config = AppConfig::default();
        config.output.oscillating_file = PathBuf::from("data.txt");
        config.output.plain_file = PathBuf::from("data.txt");
        assert!(validation_errors(&config).iter().any(|e| e.contains("Both sweeps")));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = AppConfig::default();
        config.log_level = "invalid".to_string();
        config.sweep.min_steps = 1000;
        config.output.plain_file = PathBuf::new();
        assert!(validation_errors(&config).len() >= 3);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        assert_eq!(error.to_string(), "Validation errors: Error 1; Error 2");
    }
}
