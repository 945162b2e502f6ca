//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::{Selection, DEFAULT_DEBOUNCE_MS};
use crate::period::{ComparisonKey, PeriodKey};
use crate::synth::DEFAULT_HISTORY_DAYS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub synth: SynthConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Base series generation
#[derive(Debug, Clone, Deserialize)]
pub struct SynthConfig {
    #[serde(default = "default_history_days")]
    pub history_days: usize,

    /// Fixed seed for reproducible data; entropy when unset
    pub seed: Option<u64>,
}

fn default_history_days() -> usize {
    DEFAULT_HISTORY_DAYS
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            history_days: default_history_days(),
            seed: None,
        }
    }
}

/// Initial selection and refresh behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_period")]
    pub default_period: String,

    #[serde(default = "default_comparison")]
    pub default_comparison: String,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_period() -> String {
    PeriodKey::default().as_str().to_string()
}

fn default_comparison() -> String {
    ComparisonKey::default().as_str().to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
            default_comparison: default_comparison(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl DashboardConfig {
    /// Unknown keys fall back to `last28`
    pub fn period_key(&self) -> PeriodKey {
        PeriodKey::from(self.default_period.as_str())
    }

    /// Unknown keys fall back to `previous_period`
    pub fn comparison_key(&self) -> ComparisonKey {
        ComparisonKey::from(self.default_comparison.as_str())
    }

    /// Selection the dashboard opens with
    pub fn initial_selection(&self) -> Selection {
        Selection::new(self.period_key(), self.comparison_key())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "runtime")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("storepulse").join("config.toml")),
            Some(PathBuf::from("/etc/storepulse/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Synth overrides
        if let Some(seed) = env_parse("STOREPULSE_SEED") {
            self.synth.seed = Some(seed);
        }
        if let Some(days) = env_parse("STOREPULSE_HISTORY_DAYS") {
            self.synth.history_days = days;
        }

        // Dashboard overrides
        if let Ok(period) = std::env::var("STOREPULSE_DEFAULT_PERIOD") {
            self.dashboard.default_period = period;
        }
        if let Ok(comparison) = std::env::var("STOREPULSE_DEFAULT_COMPARISON") {
            self.dashboard.default_comparison = comparison;
        }
        if let Some(ms) = env_parse("STOREPULSE_DEBOUNCE_MS") {
            self.dashboard.debounce_ms = ms;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("STOREPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STOREPULSE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Parsed environment variable; unset or malformed values are ignored
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring malformed {}={:?}", key, raw);
            None
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# StorePulse Configuration
#
# Environment variables override these settings:
# - STOREPULSE_SEED
# - STOREPULSE_HISTORY_DAYS
# - STOREPULSE_DEFAULT_PERIOD
# - STOREPULSE_DEFAULT_COMPARISON
# - STOREPULSE_DEBOUNCE_MS
# - STOREPULSE_LOG_LEVEL
# - STOREPULSE_LOG_FORMAT

[synth]
# Days of synthetic history ending today
history_days = 730

# Fixed random seed for reproducible dashboards
# seed = 42

[dashboard]
# Period shown on startup: today, yesterday, last7, last28, last365
default_period = "last28"

# Comparison shown on startup: previous_period, previous_year
default_comparison = "previous_period"

# Quiet time before a selection change triggers a refresh (ms)
debounce_ms = 500

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/storepulse/storepulse.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.synth.history_days, 730);
        assert_eq!(config.synth.seed, None);
        assert_eq!(config.dashboard.period_key(), PeriodKey::Last28);
        assert_eq!(config.dashboard.comparison_key(), ComparisonKey::PreviousPeriod);
        assert_eq!(config.dashboard.debounce_ms, 500);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.synth.history_days, 730);
        assert_eq!(config.dashboard.default_period, "last28");
        assert_eq!(config.dashboard.debounce_ms, 500);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[synth]\nseed = 7\n\n[dashboard]\ndefault_period = \"last7\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.synth.seed, Some(7));
        assert_eq!(config.synth.history_days, 730);
        assert_eq!(config.dashboard.period_key(), PeriodKey::Last7);
        assert_eq!(config.logging.format, "pretty");

        let selection = config.dashboard.initial_selection();
        assert_eq!(selection.period, PeriodKey::Last7);
        assert_eq!(selection.comparison, ComparisonKey::PreviousPeriod);
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        let config = Config::parse(
            "[dashboard]\ndefault_period = \"fortnight\"\ndefault_comparison = \"lunar\"",
        )
        .unwrap();
        assert_eq!(config.dashboard.period_key(), PeriodKey::Last28);
        assert_eq!(config.dashboard.comparison_key(), ComparisonKey::PreviousPeriod);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[synth\nseed = ").unwrap();

        match Config::load(file.path()).unwrap_err() {
            ConfigError::Parse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("STOREPULSE_SEED", "99");
        std::env::set_var("STOREPULSE_DEBOUNCE_MS", "not-a-number");
        std::env::set_var("STOREPULSE_DEFAULT_PERIOD", "last365");
        std::env::set_var("STOREPULSE_LOG_FORMAT", "json");

        let config = Config::from_env();

        std::env::remove_var("STOREPULSE_SEED");
        std::env::remove_var("STOREPULSE_DEBOUNCE_MS");
        std::env::remove_var("STOREPULSE_DEFAULT_PERIOD");
        std::env::remove_var("STOREPULSE_LOG_FORMAT");

        assert_eq!(config.synth.seed, Some(99));
        assert_eq!(config.dashboard.debounce_ms, 500);
        assert_eq!(config.dashboard.period_key(), PeriodKey::Last365);
        assert!(config.logging.is_json());
    }
}
