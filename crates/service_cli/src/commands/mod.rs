//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod minimise;
pub mod regress;
pub mod roots;

use crate::{CliError, Result};

/// Parse a comma-separated list of numbers such as `-1.2,1`.
pub fn parse_vector(text: &str) -> Result<Vec<f64>> {
    let values = text
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>().map_err(|_| {
                CliError::InvalidArgument(format!("'{}' is not a number in '{}'", part, text))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.iter().any(|v| !v.is_finite()) {
        return Err(CliError::InvalidArgument(format!("non-finite value in '{}'", text)));
    }
    Ok(values)
}

/// Parse `--start`, falling back to `default` when absent, and check its length.
pub(crate) fn start_point(
    start: Option<&str>,
    default: &[f64],
    dimension: Option<usize>,
) -> Result<Vec<f64>> {
    let x0 = match start {
        Some(text) => parse_vector(text)?,
        None => default.to_vec(),
    };
    if let Some(n) = dimension {
        if x0.len() != n {
            return Err(CliError::InvalidArgument(format!(
                "expected {} starting values, got {}",
                n,
                x0.len()
            )));
        }
    }
    Ok(x0)
}
