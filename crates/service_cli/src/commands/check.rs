//! Check command implementation
//!
//! Prints the effective configuration and runs a quick self-test of each
//! numerical routine on a problem with a known answer.

use numerics_core::math::distributions::{norm_cdf, norm_inv_cdf};
use numerics_core::math::linalg::{LuDecomposition, Matrix};
use numerics_core::math::solvers::{BisectionSolver, SolverConfig, VectorNewtonSolver};
use numerics_core::NumericError;
use numerics_optimiser::minimisers::{Bfgs, GoldenSectionSearch};
use numerics_optimiser::regression::{LassoRegression, RidgeRegression};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::output::format_table;
use crate::{CliError, Result};

/// Result of one self-test.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    version: &'static str,
    config: &'a CliConfig,
    checks: &'a [CheckResult],
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

fn run_check<F>(name: &'static str, check: F) -> CheckResult
where
    F: FnOnce() -> std::result::Result<bool, NumericError>,
{
    match check() {
        Ok(true) => CheckResult {
            name,
            passed: true,
            detail: "ok".to_string(),
        },
        Ok(false) => CheckResult {
            name,
            passed: false,
            detail: "wrong answer".to_string(),
        },
        Err(e) => CheckResult {
            name,
            passed: false,
            detail: e.to_string(),
        },
    }
}

/// Run every self-test.
pub fn self_test() -> Vec<CheckResult> {
    vec![
        run_check("lu", || {
            let a = Matrix::from_rows(&[vec![4.0, 3.0], vec![6.0, 3.0]])?;
            let x = LuDecomposition::generate(&a)?.linear_solve(&[10.0, 12.0])?;
            Ok(close(x[0], 1.0, 1e-12) && close(x[1], 2.0, 1e-12))
        }),
        run_check("bisection", || {
            let solver = BisectionSolver::new(SolverConfig::default());
            let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0)?;
            Ok(close(root, 2f64.sqrt(), 1e-9))
        }),
        run_check("vector_newton", || {
            let f = |x: &[f64]| vec![x[0] * x[0] - 4.0, x[1] - 1.0];
            let j = |x: &[f64]| {
                let mut m = Matrix::identity(2);
                m[(0, 0)] = 2.0 * x[0];
                m
            };
            let root = VectorNewtonSolver::with_defaults().solve(f, j, &[1.0, 0.0])?;
            Ok(close(root.x[0], 2.0, 1e-8) && close(root.x[1], 1.0, 1e-8))
        }),
        run_check("golden_section", || {
            let search = GoldenSectionSearch::with_defaults();
            let min = search.minimise(|x| (x - 1.5).powi(2), 0.0, 4.0)?;
            Ok(close(min.x, 1.5, 1e-8))
        }),
        run_check("bfgs", || {
            let f = |p: &[f64]| (p[0] - 2.0).powi(2) + 3.0 * (p[1] + 1.0).powi(2);
            let g = |p: &[f64]| vec![2.0 * (p[0] - 2.0), 6.0 * (p[1] + 1.0)];
            let min = Bfgs::with_defaults().minimise(f, g, &[0.0, 0.0])?;
            Ok(close(min.x[0], 2.0, 1e-6) && close(min.x[1], -1.0, 1e-6))
        }),
        run_check("ridge", || {
            let x = Matrix::from_rows(&[vec![1.0, 0.0], vec![1.0, 1.0], vec![1.0, 2.0]])?;
            let fit = RidgeRegression::new(0.0).fit(&x, &[1.0, 3.0, 5.0])?;
            Ok(close(fit.coefficients[0], 1.0, 1e-10) && close(fit.coefficients[1], 2.0, 1e-10))
        }),
        run_check("lasso", || {
            let x = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]])?;
            // λ/2 = 1 shrinks each coefficient by one
            let fit = LassoRegression::new(2.0).fit(&x, &[3.0, -0.5])?;
            Ok(close(fit.coefficients[0], 2.0, 1e-12) && fit.coefficients[1] == 0.0)
        }),
        run_check("normal", || {
            let z = norm_inv_cdf(0.975)?;
            Ok(close(z, 1.959_963_985, 1e-8) && close(norm_cdf(z), 0.975, 1e-7))
        }),
    ]
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration and numerical routines...");

    let checks = self_test();
    let failed: Vec<&CheckResult> = checks.iter().filter(|c| !c.passed).collect();
    for check in &failed {
        warn!(name = check.name, detail = %check.detail, "self-test failed");
    }

    match config.output_format {
        OutputFormat::Json => {
            let report = CheckReport {
                version: env!("CARGO_PKG_VERSION"),
                config,
                checks: &checks,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            let source = config
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(defaults)".to_string());
            let or_default = |v: Option<String>| v.unwrap_or_else(|| "solver default".to_string());

            let settings = vec![
                ("version".to_string(), env!("CARGO_PKG_VERSION").to_string()),
                ("config".to_string(), source),
                ("log_level".to_string(), config.log_level.to_string()),
                ("format".to_string(), config.output_format.to_string()),
                (
                    "max_iterations".to_string(),
                    or_default(config.max_iterations.map(|n| n.to_string())),
                ),
                (
                    "tolerance".to_string(),
                    or_default(config.tolerance.map(|t| format!("{:e}", t))),
                ),
            ];
            println!("{}", format_table("Configuration", &settings));
            println!();

            let results: Vec<(String, String)> = checks
                .iter()
                .map(|c| (c.name.to_string(), c.detail.clone()))
                .collect();
            println!("{}", format_table("Self-test", &results));
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::SelfTestFailed(failed.len()))
    }
}
