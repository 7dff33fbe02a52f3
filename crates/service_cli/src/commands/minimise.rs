//! Minimise command implementation
//!
//! Runs BFGS on the built-in multivariate objectives and golden-section
//! search on the built-in scalar objective.

use numerics_core::Outcome;
use numerics_optimiser::minimisers::{
    Bfgs, BfgsConfig, GoldenSectionConfig, GoldenSectionSearch, ScalarMinResult, VectorMinResult,
};
use tracing::info;

use super::start_point;
use crate::config::CliConfig;
use crate::output::{self, format_vector};
use crate::{CliError, Result};

/// Built-in objectives
pub const PROBLEMS: &[&str] = &["rosenbrock", "quadratic", "golden"];

fn rosenbrock(p: &[f64]) -> f64 {
    (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2)
}

fn rosenbrock_gradient(p: &[f64]) -> Vec<f64> {
    vec![
        -2.0 * (1.0 - p[0]) - 400.0 * p[0] * (p[1] - p[0] * p[0]),
        200.0 * (p[1] - p[0] * p[0]),
    ]
}

/// `Σ (i + 1)(xᵢ - (i + 1))²`, minimum at `(1, 2, ..., n)`
fn weighted_quadratic(p: &[f64]) -> f64 {
    p.iter()
        .enumerate()
        .map(|(i, x)| {
            let k = (i + 1) as f64;
            k * (x - k).powi(2)
        })
        .sum()
}

fn weighted_quadratic_gradient(p: &[f64]) -> Vec<f64> {
    p.iter()
        .enumerate()
        .map(|(i, x)| {
            let k = (i + 1) as f64;
            2.0 * k * (x - k)
        })
        .collect()
}

/// `x⁴ - 3x³ + 2`, unimodal on `[0, 5]` with its minimum at `x = 9/4`
fn quartic(x: f64) -> f64 {
    x.powi(4) - 3.0 * x.powi(3) + 2.0
}

fn bfgs_config(config: &CliConfig) -> BfgsConfig {
    let mut bfgs = BfgsConfig::default();
    if let Some(max_iterations) = config.max_iterations {
        bfgs = bfgs.with_max_iterations(max_iterations);
    }
    if let Some(tolerance) = config.tolerance {
        bfgs = bfgs.with_gradient_tolerance(tolerance);
    }
    bfgs
}

fn golden_config(config: &CliConfig) -> GoldenSectionConfig {
    let mut golden = GoldenSectionConfig::default();
    if let Some(max_iterations) = config.max_iterations {
        golden = golden.with_max_iterations(max_iterations);
    }
    if let Some(tolerance) = config.tolerance {
        golden = golden.with_tolerance(tolerance);
    }
    golden
}

/// Minimise a multivariate objective with BFGS.
///
/// With `numerical` set the analytic gradient is replaced by central
/// differences.
pub fn minimise_vector(
    problem: &str,
    start: Option<&str>,
    numerical: bool,
    config: &CliConfig,
) -> Result<Outcome<VectorMinResult>> {
    let bfgs = Bfgs::new(bfgs_config(config));

    let result = match problem {
        "rosenbrock" => {
            let x0 = start_point(start, &[-1.2, 1.0], Some(2))?;
            if numerical {
                bfgs.minimise_numerical(rosenbrock, &x0)
            } else {
                bfgs.minimise(rosenbrock, rosenbrock_gradient, &x0)
            }
        }
        "quadratic" => {
            let x0 = start_point(start, &[0.0, 0.0, 0.0], None)?;
            if numerical {
                bfgs.minimise_numerical(weighted_quadratic, &x0)
            } else {
                bfgs.minimise(weighted_quadratic, weighted_quadratic_gradient, &x0)
            }
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown problem: {}. Supported: {}",
                other,
                PROBLEMS.join(", ")
            )));
        }
    };

    Ok(result.into())
}

/// Minimise the scalar quartic on the bracket `start` (`lower,upper`).
pub fn minimise_scalar(
    bracket: Option<&str>,
    config: &CliConfig,
) -> Result<Outcome<ScalarMinResult>> {
    let bounds = start_point(bracket, &[0.0, 5.0], Some(2))?;
    let search = GoldenSectionSearch::new(golden_config(config));
    Ok(search.minimise(quartic, bounds[0], bounds[1]).into())
}

/// Run the minimise command
pub fn run(problem: &str, start: Option<&str>, numerical: bool, config: &CliConfig) -> Result<()> {
    info!("Minimising objective...");
    info!("  Problem: {}", problem);

    let title = format!("Minimum of {}", problem);
    match problem {
        "golden" => {
            let outcome = minimise_scalar(start, config)?;
            output::emit(config.output_format, &title, &outcome, |min| {
                vec![
                    ("x".to_string(), min.x.to_string()),
                    ("value".to_string(), min.value.to_string()),
                    ("iterations".to_string(), min.iterations.to_string()),
                    ("exit".to_string(), min.exit_condition.to_string()),
                ]
            })
        }
        _ => {
            if numerical {
                info!("  Gradient: central differences");
            }
            let outcome = minimise_vector(problem, start, numerical, config)?;
            output::emit(config.output_format, &title, &outcome, |min| {
                vec![
                    ("x".to_string(), format_vector(&min.x)),
                    ("value".to_string(), format!("{:e}", min.value)),
                    ("gradient".to_string(), format!("{:e}", min.gradient_norm)),
                    ("iterations".to_string(), min.iterations.to_string()),
                    ("exit".to_string(), min.exit_condition.to_string()),
                ]
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rosenbrock_default_start() {
        let outcome = minimise_vector("rosenbrock", None, false, &CliConfig::default()).unwrap();
        let min = outcome.data().unwrap();
        assert_abs_diff_eq!(min.x[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(min.x[1], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_quadratic_any_dimension() {
        let outcome =
            minimise_vector("quadratic", Some("5,5,5,5"), false, &CliConfig::default()).unwrap();
        let min = outcome.data().unwrap();
        for (i, x) in min.x.iter().enumerate() {
            assert_abs_diff_eq!(*x, (i + 1) as f64, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_numerical_gradient() {
        let outcome =
            minimise_vector("quadratic", Some("0,0"), true, &CliConfig::default()).unwrap();
        let min = outcome.data().unwrap();
        assert_abs_diff_eq!(min.x[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(min.x[1], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_iteration_cap_reports_failure() {
        let config = CliConfig {
            max_iterations: Some(2),
            ..Default::default()
        };
        let outcome = minimise_vector("rosenbrock", None, false, &config).unwrap();
        assert!(outcome.is_error());
    }

    #[test]
    fn test_golden_default_bracket() {
        let outcome = minimise_scalar(None, &CliConfig::default()).unwrap();
        let min = outcome.data().unwrap();
        assert_abs_diff_eq!(min.x, 2.25, epsilon = 1e-6);
        assert!(min.exit_condition.is_converged());
    }

    #[test]
    fn test_golden_inverted_bracket_fails() {
        let outcome = minimise_scalar(Some("5,0"), &CliConfig::default()).unwrap();
        assert!(outcome.is_error());
    }

    #[test]
    fn test_unknown_problem() {
        assert!(minimise_vector("himmelblau", None, false, &CliConfig::default()).is_err());
    }
}
