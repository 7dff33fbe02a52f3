//! CLI error types

use numerics_core::ErrorResult;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} self-test(s) failed")]
    SelfTestFailed(usize),

    /// A numerical routine reported failure through its outcome record.
    #[error("{} failed: {}", .0.kind.kind_name(), .0.message)]
    Numeric(ErrorResult),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
