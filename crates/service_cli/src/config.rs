//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "NUMERICS_LOG_LEVEL";
/// Environment variable overriding the solver iteration cap
pub const ENV_MAX_ITERATIONS: &str = "NUMERICS_MAX_ITERATIONS";
/// Environment variable overriding the solver tolerance
pub const ENV_TOLERANCE: &str = "NUMERICS_TOLERANCE";
/// Environment variable overriding the output format
pub const ENV_FORMAT: &str = "NUMERICS_FORMAT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Effective CLI configuration
///
/// `max_iterations` and `tolerance` are overrides: when unset, every solver
/// keeps its own default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format for command results
    #[serde(rename = "format", deserialize_with = "deserialize_format")]
    pub output_format: OutputFormat,
    /// Iteration cap applied to every solver
    pub max_iterations: Option<usize>,
    /// Convergence tolerance applied to every solver
    pub tolerance: Option<f64>,
    /// File the configuration was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let mut config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.source = Some(path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Apply `NUMERICS_*` overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.output_format = OutputFormat::from_str(&format)?;
        }
        if let Some(value) = lookup(ENV_MAX_ITERATIONS) {
            self.max_iterations = Some(parse_value(ENV_MAX_ITERATIONS, &value)?);
        }
        if let Some(value) = lookup(ENV_TOLERANCE) {
            self.tolerance = Some(parse_value(ENV_TOLERANCE, &value)?);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "max_iterations".to_string(),
                value: "0".to_string(),
            });
        }
        if let Some(tolerance) = self.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: "tolerance".to_string(),
                    value: tolerance.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(format) = &cli.output_format {
            self.output_format = OutputFormat::from_str(format)?;
        }
        if let Some(max_iterations) = cli.max_iterations {
            self.max_iterations = Some(max_iterations);
        }
        if let Some(tolerance) = cli.tolerance {
            self.tolerance = Some(tolerance);
        }
        Ok(())
    }
}

/// Configuration-relevant command-line arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub output_format: Option<String>,
    /// Iteration cap override
    pub max_iterations: Option<usize>,
    /// Tolerance override
    pub tolerance: Option<f64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
///
/// A config file that does not exist is skipped.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) if path.exists() => CliConfig::from_file(path)?,
        _ => CliConfig::default(),
    };

    config.apply_overrides(lookup)?;
    config.merge_with_cli(cli)?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.max_iterations.is_none());
        assert!(config.tolerance.is_none());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("csv").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            format = "json"
            max_iterations = 500
            tolerance = 1e-12
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.max_iterations, Some(500));
        assert_eq!(config.tolerance, Some(1e-12));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("max_iterations = 50").unwrap();
        assert_eq!(config.max_iterations, Some(50));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.tolerance.is_none());
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        let result: Result<CliConfig, _> = toml::from_str(r#"log_level = "loud""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        let zero_cap = CliConfig {
            max_iterations: Some(0),
            ..Default::default()
        };
        assert!(zero_cap.validate().is_err());

        let negative_tol = CliConfig {
            tolerance: Some(-1e-6),
            ..Default::default()
        };
        assert!(negative_tol.validate().is_err());

        let nan_tol = CliConfig {
            tolerance: Some(f64::NAN),
            ..Default::default()
        };
        assert!(nan_tol.validate().is_err());

        assert!(CliConfig::default().validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_overrides(env_of(&[
                (ENV_LOG_LEVEL, "trace"),
                (ENV_MAX_ITERATIONS, "25"),
                (ENV_TOLERANCE, "1e-6"),
                (ENV_FORMAT, "json"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_iterations, Some(25));
        assert_eq!(config.tolerance, Some(1e-6));
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = CliConfig::default();
        let err = config
            .apply_overrides(env_of(&[(ENV_MAX_ITERATIONS, "many")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_ITERATIONS));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = CliConfig::default();
        let cli = CliArgs {
            log_level: Some("error".to_string()),
            tolerance: Some(1e-4),
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.tolerance, Some(1e-4));
        assert!(config.max_iterations.is_none());
    }

    #[test]
    fn test_build_config_missing_file_uses_defaults() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/numerics.toml")),
            ..Default::default()
        };
        let config = build_config_with(&cli, no_env).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_build_config_priority() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"info\"").unwrap();
        writeln!(file, "max_iterations = 10").unwrap();
        writeln!(file, "tolerance = 1e-3").unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            tolerance: Some(1e-9),
            ..Default::default()
        };
        let config = build_config_with(&cli, env_of(&[(ENV_MAX_ITERATIONS, "20")])).unwrap();

        // file < env < cli
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.max_iterations, Some(20));
        assert_eq!(config.tolerance, Some(1e-9));
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tolerance = 0.0").unwrap();
        assert!(CliConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("loud".to_string());
        assert!(err.to_string().contains("loud"));

        let err = ConfigError::FileError("missing".to_string());
        assert!(err.to_string().contains("missing"));
    }
}
