//! Roots command implementation
//!
//! Solves one of the built-in two-dimensional nonlinear systems with the
//! vector Newton solver.

use numerics_core::math::linalg::Matrix;
use numerics_core::math::solvers::{VectorNewtonConfig, VectorNewtonSolver, VectorRoot};
use numerics_core::Outcome;
use tracing::info;

use super::start_point;
use crate::config::CliConfig;
use crate::output::{self, format_vector};
use crate::{CliError, Result};

/// Built-in systems
pub const PROBLEMS: &[&str] = &["quadratic-pair", "circle-line"];

/// `(x - 2)(x - 4) = 0`, `(y - 3)(y - 5) = 0`
fn quadratic_pair(x: &[f64]) -> Vec<f64> {
    vec![(x[0] - 2.0) * (x[0] - 4.0), (x[1] - 3.0) * (x[1] - 5.0)]
}

fn quadratic_pair_jacobian(x: &[f64]) -> Matrix {
    let mut j = Matrix::zeros(2, 2);
    j[(0, 0)] = 2.0 * x[0] - 6.0;
    j[(1, 1)] = 2.0 * x[1] - 8.0;
    j
}

/// `x² + y² = 4`, `x = y`
fn circle_line(x: &[f64]) -> Vec<f64> {
    vec![x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]]
}

fn circle_line_jacobian(x: &[f64]) -> Matrix {
    let mut j = Matrix::zeros(2, 2);
    j[(0, 0)] = 2.0 * x[0];
    j[(0, 1)] = 2.0 * x[1];
    j[(1, 0)] = 1.0;
    j[(1, 1)] = -1.0;
    j
}

fn solver_config(config: &CliConfig) -> VectorNewtonConfig {
    let defaults = VectorNewtonConfig::default();
    let tolerance = config.tolerance.unwrap_or(defaults.function_tolerance);
    VectorNewtonConfig::new(
        config.max_iterations.unwrap_or(defaults.max_iterations),
        tolerance,
        tolerance,
    )
}

/// Solve the named system from `start` (or its default start).
pub fn solve(
    problem: &str,
    start: Option<&str>,
    config: &CliConfig,
) -> Result<Outcome<VectorRoot>> {
    let solver = VectorNewtonSolver::new(solver_config(config));

    let result = match problem {
        "quadratic-pair" => {
            let x0 = start_point(start, &[1.0, 2.0], Some(2))?;
            solver.solve(quadratic_pair, quadratic_pair_jacobian, &x0)
        }
        "circle-line" => {
            let x0 = start_point(start, &[1.0, 0.5], Some(2))?;
            solver.solve(circle_line, circle_line_jacobian, &x0)
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

/// Run the roots command
pub fn run(problem: &str, start: Option<&str>, config: &CliConfig) -> Result<()> {
    info!("Solving nonlinear system...");
    info!("  Problem: {}", problem);

    let outcome = solve(problem, start, config)?;

    output::emit(
        config.output_format,
        &format!("Root of {}", problem),
        &outcome,
        |root| {
            vec![
                ("x".to_string(), format_vector(&root.x)),
                ("residual".to_string(), format!("{:e}", root.residual_norm)),
                ("iterations".to_string(), root.iterations.to_string()),
                ("convergence".to_string(), format!("{:?}", root.convergence)),
            ]
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quadratic_pair_default_start() {
        let outcome = solve("quadratic-pair", None, &CliConfig::default()).unwrap();
        let root = outcome.data().unwrap();
        assert_abs_diff_eq!(root.x[0], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(root.x[1], 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_circle_line() {
        let outcome = solve("circle-line", Some("1,0.5"), &CliConfig::default()).unwrap();
        let root = outcome.data().unwrap();
        assert_abs_diff_eq!(root.x[0], 2f64.sqrt(), epsilon = 1e-8);
        assert_abs_diff_eq!(root.x[1], 2f64.sqrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_iteration_cap_from_config() {
        let config = CliConfig {
            max_iterations: Some(1),
            ..Default::default()
        };
        let outcome = solve("quadratic-pair", None, &config).unwrap();
        assert!(outcome.is_error());
        assert!(outcome.message().contains("1 iterations"));
    }

    #[test]
    fn test_singular_start_reports_outcome() {
        // Jacobian of the quadratic pair vanishes at (3, 4)
        let outcome = solve("quadratic-pair", Some("3,4"), &CliConfig::default()).unwrap();
        assert!(outcome.is_error());
    }

    #[test]
    fn test_unknown_problem() {
        let err = solve("sphere", None, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_wrong_dimension() {
        assert!(solve("circle-line", Some("1,2,3"), &CliConfig::default()).is_err());
    }
}
