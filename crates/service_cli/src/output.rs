//! Result rendering
//!
//! Every command produces an [`Outcome`]. In table mode a success prints a
//! two-column report and a failure prints its message and ancillary lines to
//! stderr; in JSON mode the whole outcome record is printed to stdout. A
//! failed outcome always turns into [`CliError::Numeric`] so the process
//! exits non-zero.

use numerics_core::Outcome;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::{CliError, Result};

const RULE: &str = "----------------------------------------";

/// One labelled line of a table report.
pub type Row = (String, String);

/// Render `rows` under `title` as a fixed-width two-column table.
pub fn format_table(title: &str, rows: &[Row]) -> String {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0).max(10);

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    for (key, value) in rows {
        out.push_str(&format!("{:<width$}  {}\n", key, value, width = width));
    }
    out.push_str(RULE);
    out
}

/// Format a vector with full round-trip precision.
pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{}", v)).collect();
    format!("[{}]", parts.join(", "))
}

/// Print `outcome` in the configured format.
///
/// # Errors
///
/// * `CliError::Numeric` - the outcome is a failure
/// * `CliError::Json` - JSON serialisation failed
pub fn emit<T, F>(format: OutputFormat, title: &str, outcome: &Outcome<T>, rows: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Vec<Row>,
{
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Table => match outcome {
            Outcome::Success(data) => println!("{}", format_table(title, &rows(data))),
            Outcome::Error(err) => {
                eprintln!("{}: {}", title, err.message);
                for line in &err.ancillary {
                    eprintln!("  {}", line);
                }
            }
        },
    }

    match outcome {
        Outcome::Success(_) => Ok(()),
        Outcome::Error(err) => Err(CliError::Numeric(err.clone())),
    }
}
