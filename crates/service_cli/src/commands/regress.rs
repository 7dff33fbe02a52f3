//! Regress command implementation
//!
//! Fits ridge or lasso coefficients to a CSV data set. The first row holds
//! column names, the last column is the response and every other column is a
//! predictor.

use std::path::Path;

use numerics_core::math::linalg::Matrix;
use numerics_core::Outcome;
use numerics_optimiser::regression::{LassoRegression, RegressionFit, RidgeRegression};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::output::{self, format_vector};
use crate::{CliError, Result};

/// Name given to the prepended constant column.
pub const INTERCEPT: &str = "intercept";

/// Design matrix and response parsed from a CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Predictor names, one per design column
    pub predictors: Vec<String>,
    /// Response column name
    pub response: String,
    /// Design matrix
    pub design: Matrix,
    /// Response values
    pub observations: Vec<f64>,
}

/// Coefficients labelled with their column names.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionReport {
    pub method: String,
    pub lambda: f64,
    pub response: String,
    pub predictors: Vec<String>,
    pub coefficients: Vec<f64>,
    pub residual_ss: f64,
    pub iterations: usize,
}

/// Parse CSV text into a [`Dataset`], optionally prepending an intercept column.
pub fn parse_dataset(content: &str, intercept: bool) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.len() < 2 {
        return Err(CliError::InvalidArgument(format!(
            "expected at least two columns, found {}",
            headers.len()
        )));
    }

    let mut rows = Vec::new();
    let mut observations = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let mut values = Vec::with_capacity(record.len());
        for (field, name) in record.iter().zip(&headers) {
            let value: f64 = field.trim().parse().map_err(|_| {
                CliError::InvalidArgument(format!(
                    "row {}, column '{}': '{}' is not a number",
                    line + 1,
                    name,
                    field
                ))
            })?;
            values.push(value);
        }

        let response = values.pop().unwrap_or_default();
        if intercept {
            values.insert(0, 1.0);
        }
        rows.push(values);
        observations.push(response);
    }

    if rows.is_empty() {
        return Err(CliError::InvalidArgument("no data rows".to_string()));
    }

    let mut predictors: Vec<String> = headers[..headers.len() - 1].to_vec();
    if intercept {
        predictors.insert(0, INTERCEPT.to_string());
    }
    let response = headers[headers.len() - 1].clone();

    let design = Matrix::from_rows(&rows)
        .map_err(|e| CliError::InvalidArgument(format!("malformed design matrix: {}", e)))?;
    debug!(rows = design.rows(), cols = design.cols(), "dataset parsed");

    Ok(Dataset {
        predictors,
        response,
        design,
        observations,
    })
}

/// Read a [`Dataset`] from a CSV file.
pub fn read_dataset(path: &str, intercept: bool) -> Result<Dataset> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_dataset(&content, intercept)
}

/// Fit `method` with penalty `lambda` to `data`.
pub fn fit(
    data: &Dataset,
    method: &str,
    lambda: f64,
    config: &CliConfig,
) -> Result<Outcome<RegressionReport>> {
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "lambda must be non-negative and finite, got {}",
            lambda
        )));
    }

    let result: std::result::Result<RegressionFit, _> = match method {
        "ridge" => RidgeRegression::new(lambda).fit(&data.design, &data.observations),
        "lasso" => {
            let mut lasso = LassoRegression::new(lambda);
            if let Some(max_iterations) = config.max_iterations {
                lasso = lasso.with_max_iterations(max_iterations);
            }
            if let Some(tolerance) = config.tolerance {
                lasso = lasso.with_tolerance(tolerance);
            }
            lasso.fit(&data.design, &data.observations)
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown method: {}. Supported: ridge, lasso",
                other
            )));
        }
    };

    let outcome: Outcome<RegressionFit> = result.into();
    Ok(outcome.map(|fit| RegressionReport {
        method: method.to_string(),
        lambda,
        response: data.response.clone(),
        predictors: data.predictors.clone(),
        coefficients: fit.coefficients,
        residual_ss: fit.residual_ss,
        iterations: fit.iterations,
    }))
}

/// Run the regress command
pub fn run(
    data_path: &str,
    method: &str,
    lambda: f64,
    intercept: bool,
    config: &CliConfig,
) -> Result<()> {
    info!("Fitting regression...");
    info!("  Data: {}", data_path);
    info!("  Method: {} (lambda = {})", method, lambda);

    let data = read_dataset(data_path, intercept)?;
    info!(
        "  Observations: {}, predictors: {}",
        data.observations.len(),
        data.predictors.len()
    );

    let outcome = fit(&data, method, lambda, config)?;

    output::emit(
        config.output_format,
        &format!("{} regression of {}", method, data.response),
        &outcome,
        |report| {
            let mut rows: Vec<(String, String)> = report
                .predictors
                .iter()
                .zip(&report.coefficients)
                .map(|(name, beta)| (name.clone(), beta.to_string()))
                .collect();
            rows.push(("rss".to_string(), format!("{:e}", report.residual_ss)));
            rows.push(("iterations".to_string(), report.iterations.to_string()));
            rows.push(("coefficients".to_string(), format_vector(&report.coefficients)));
            rows
        },
    )
}
