//! Multi-dimensional Newton-Raphson solver.
//!
//! # Algorithm
//!
//! ```text
//! J(x_k) δ_k = -f(x_k)
//! x_{k+1}   = x_k + δ_k
//! ```
//!
//! The Jacobian is factored with [`LuDecomposition`] at every iteration.
//! Iteration stops when `Σ|f_i(x)| <= function_tolerance` or
//! `Σ|δ_i| < step_tolerance`.

use super::VectorNewtonConfig;
use crate::cancel::{check_optional, CancellationToken};
use crate::math::linalg::{vector, LuDecomposition, Matrix};
use crate::types::NumericError;
use crate::validation::{ensure_finite, ensure_length, ensure_non_empty};

/// Which tolerance ended a successful vector Newton solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RootConvergence {
    /// Residual L1 norm reached the function tolerance.
    FunctionTolerance,
    /// Newton step L1 norm fell below the step tolerance.
    StepTolerance,
}

/// Result of a converged vector Newton solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorRoot {
    /// Root estimate.
    pub x: Vec<f64>,
    /// L1 norm of `f(x)` at the last evaluated iterate.
    pub residual_norm: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Stopping criterion that was met.
    pub convergence: RootConvergence,
}

/// Newton-Raphson solver for `f: Rⁿ -> Rⁿ` with an analytic Jacobian.
///
/// The initial guess is copied at entry; the caller's slice is never
/// modified and the root is returned as a freshly owned vector.
///
/// # Example
///
/// ```
/// use numerics_core::math::linalg::Matrix;
/// use numerics_core::math::solvers::VectorNewtonSolver;
///
/// let solver = VectorNewtonSolver::with_defaults();
///
/// // x² + y² = 4, x - y = 0
/// let f = |v: &[f64]| vec![v[0] * v[0] + v[1] * v[1] - 4.0, v[0] - v[1]];
/// let j = |v: &[f64]| {
///     Matrix::from_rows(&[vec![2.0 * v[0], 2.0 * v[1]], vec![1.0, -1.0]]).unwrap()
/// };
///
/// let root = solver.solve(f, j, &[1.0, 0.5]).unwrap();
/// assert!((root.x[0] - 2f64.sqrt()).abs() < 1e-8);
/// assert!((root.x[1] - 2f64.sqrt()).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VectorNewtonSolver {
    config: VectorNewtonConfig,
    cancellation: Option<CancellationToken>,
}

impl VectorNewtonSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: VectorNewtonConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Attach a cancellation token checked once per iteration.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &VectorNewtonConfig {
        &self.config
    }

    /// Solve `f(x) = 0` starting from `x0`.
    ///
    /// # Arguments
    ///
    /// * `f` - Residual function, must return `x0.len()` values
    /// * `jacobian` - Jacobian of `f`, must return an `n x n` matrix
    /// * `x0` - Initial guess
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - empty or non-finite initial guess
    /// * `DimensionMismatch` - `f` or `jacobian` returned the wrong shape
    /// * `DecompositionFailed` - the Jacobian could not be factored
    /// * `NumericalInstability` - an iterate became non-finite
    /// * `IterationLimitExceeded` - neither tolerance was met in time
    /// * `Cancelled` - cancellation observed
    pub fn solve<F, J>(&self, f: F, jacobian: J, x0: &[f64]) -> Result<VectorRoot, NumericError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
        J: Fn(&[f64]) -> Matrix,
    {
        ensure_non_empty("x0", x0)?;
        ensure_finite("x0", x0)?;

        let n = x0.len();
        let mut x = x0.to_vec();

        for iteration in 0..self.config.max_iterations {
            check_optional(self.cancellation.as_ref(), iteration)?;

            let fx = f(&x);
            ensure_length("VectorNewtonSolver residual", n, fx.len())?;

            let residual_norm = vector::sum_abs(&fx);
            tracing::trace!(iteration, residual_norm, "vector Newton iteration");
            if residual_norm <= self.config.function_tolerance {
                tracing::debug!(iteration, residual_norm, "vector Newton converged on residual");
                return Ok(VectorRoot {
                    x,
                    residual_norm,
                    iterations: iteration,
                    convergence: RootConvergence::FunctionTolerance,
                });
            }

            let jac = jacobian(&x);
            if jac.rows() != n || jac.cols() != n {
                return Err(NumericError::dimension_mismatch(
                    "VectorNewtonSolver jacobian",
                    format!("{}x{}", n, n),
                    jac.shape(),
                ));
            }

            let lu = LuDecomposition::generate(&jac).map_err(|e| {
                tracing::warn!(iteration, error = %e, "Jacobian factorisation failed");
                NumericError::DecompositionFailed {
                    iteration,
                    reason: e.to_string(),
                }
            })?;

            let p: Vec<f64> = fx.iter().map(|v| -v).collect();
            let delta = lu.linear_solve(&p)?;

            for (xi, di) in x.iter_mut().zip(&delta) {
                *xi += di;
            }
            if x.iter().any(|v| !v.is_finite()) {
                return Err(NumericError::NumericalInstability(
                    "vector Newton iterate became non-finite".to_string(),
                ));
            }

            let step_norm = vector::sum_abs(&delta);
            if step_norm < self.config.step_tolerance {
                tracing::debug!(iteration, step_norm, "vector Newton converged on step");
                return Ok(VectorRoot {
                    x,
                    residual_norm,
                    iterations: iteration + 1,
                    convergence: RootConvergence::StepTolerance,
                });
            }
        }

        Err(NumericError::IterationLimitExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn quadratic_pair(x: &[f64]) -> Vec<f64> {
        vec![(x[0] - 2.0) * (x[0] - 4.0), (x[1] - 3.0) * (x[1] - 5.0)]
    }

    fn quadratic_pair_jacobian(x: &[f64]) -> Matrix {
        Matrix::from_rows(&[vec![2.0 * x[0] - 6.0, 0.0], vec![0.0, 2.0 * x[1] - 8.0]]).unwrap()
    }

    #[test]
    fn test_quadratic_pair_converges_to_nearest_roots() {
        let solver = VectorNewtonSolver::with_defaults();
        let root = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
            .unwrap();

        assert_abs_diff_eq!(root.x[0], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(root.x[1], 3.0, epsilon = 1e-8);
        assert!(root.iterations > 0);
    }

    #[test]
    fn test_initial_guess_not_mutated() {
        let x0 = vec![1.0, 2.0];
        let solver = VectorNewtonSolver::with_defaults();
        let _ = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &x0)
            .unwrap();
        assert_eq!(x0, vec![1.0, 2.0]);
    }

    #[test]
    fn test_already_at_root() {
        let solver = VectorNewtonSolver::with_defaults();
        let root = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &[4.0, 5.0])
            .unwrap();
        assert_eq!(root.iterations, 0);
        assert_eq!(root.convergence, RootConvergence::FunctionTolerance);
        assert_eq!(root.x, vec![4.0, 5.0]);
    }

    #[test]
    fn test_singular_jacobian_reports_decomposition_failure() {
        // Jacobian vanishes at x = 3 (between the roots 2 and 4)
        let solver = VectorNewtonSolver::with_defaults();
        let err = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &[3.0, 2.0])
            .unwrap_err();
        match err {
            NumericError::DecompositionFailed { iteration, .. } => assert_eq!(iteration, 0),
            other => panic!("Expected DecompositionFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_limit() {
        let solver = VectorNewtonSolver::new(VectorNewtonConfig::new(2, 0.0, 0.0));
        let err = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
            .unwrap_err();
        assert_eq!(err, NumericError::IterationLimitExceeded { iterations: 2 });
    }

    #[test]
    fn test_wrong_residual_length() {
        let solver = VectorNewtonSolver::with_defaults();
        let err = solver
            .solve(|_x: &[f64]| vec![1.0], quadratic_pair_jacobian, &[1.0, 2.0])
            .unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_wrong_jacobian_shape() {
        let solver = VectorNewtonSolver::with_defaults();
        let err = solver
            .solve(quadratic_pair, |_x: &[f64]| Matrix::identity(3), &[1.0, 2.0])
            .unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_empty_guess_rejected() {
        let solver = VectorNewtonSolver::with_defaults();
        let err = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &[])
            .unwrap_err();
        assert!(matches!(err, NumericError::InvalidInput(_)));
    }

    #[test]
    fn test_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let solver = VectorNewtonSolver::with_defaults().with_cancellation(token);
        let err = solver
            .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
            .unwrap_err();
        assert_eq!(err, NumericError::Cancelled { iteration: 0 });
    }

    #[test]
    fn test_deterministic() {
        let solver = VectorNewtonSolver::with_defaults();
        let a = solver.solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0]);
        let b = solver.solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0]);
        assert_eq!(a, b);
    }
}
