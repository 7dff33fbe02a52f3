//! BFGS quasi-Newton minimiser.
//!
//! # Algorithm
//!
//! Maintains an approximation `H` to the inverse Hessian, starting from the
//! identity. Each iteration:
//!
//! 1. `d = -H·g`, reset `H = I` if `d` is not a descent direction
//! 2. Strong-Wolfe line search along `d` for a step length `α`
//! 3. `s = αd`, `y = g_{k+1} - g_k`
//! 4. Rank-two update
//!
//! ```text
//! H ← (I - ρ s yᵀ) H (I - ρ y sᵀ) + ρ s sᵀ,   ρ = 1 / (sᵀy)
//! ```
//!
//! skipped when `sᵀy` is not positive. Before the first update `H` is
//! rescaled to `(sᵀy / yᵀy)·I`.

use numerics_core::cancel::{check_optional, CancellationToken};
use numerics_core::math::linalg::{vector, Matrix};
use numerics_core::validation::{ensure_finite, ensure_length, ensure_non_empty};
use numerics_core::NumericError;

use super::line_search::strong_wolfe;
use super::{ExitCondition, VectorMinResult};

/// Configuration for [`Bfgs`].
///
/// # Examples
///
/// ```
/// use numerics_optimiser::minimisers::BfgsConfig;
///
/// let config = BfgsConfig::default();
/// assert_eq!(config.gradient_tolerance, 1e-8);
/// assert_eq!(config.tolerance, 1e-10);
/// assert_eq!(config.max_iterations, 200);
///
/// let fast = BfgsConfig::fast();
/// assert!(fast.gradient_tolerance > config.gradient_tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BfgsConfig {
    /// Stop when `‖∇f‖₂` falls below this.
    pub gradient_tolerance: f64,
    /// Stop when `‖s‖₂` of an accepted step falls below this.
    pub tolerance: f64,
    /// Maximum outer iterations.
    pub max_iterations: usize,
}

impl Default for BfgsConfig {
    fn default() -> Self {
        Self {
            gradient_tolerance: 1e-8,
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }
}

impl BfgsConfig {
    /// Create a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if either tolerance is negative or `max_iterations == 0`.
    pub fn new(gradient_tolerance: f64, tolerance: f64, max_iterations: usize) -> Self {
        assert!(
            gradient_tolerance >= 0.0,
            "gradient_tolerance must be non-negative"
        );
        assert!(tolerance >= 0.0, "tolerance must be non-negative");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            gradient_tolerance,
            tolerance,
            max_iterations,
        }
    }

    /// Tight tolerances and a larger iteration budget.
    pub fn high_precision() -> Self {
        Self {
            gradient_tolerance: 1e-12,
            tolerance: 1e-14,
            max_iterations: 1000,
        }
    }

    /// Relaxed tolerances for interactive use.
    pub fn fast() -> Self {
        Self {
            gradient_tolerance: 1e-5,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }

    /// Set the gradient-norm tolerance.
    pub fn with_gradient_tolerance(mut self, gradient_tolerance: f64) -> Self {
        self.gradient_tolerance = gradient_tolerance;
        self
    }

    /// Set the step-length tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// BFGS minimiser for smooth `f: Rⁿ -> R`.
///
/// # Example
///
/// ```
/// use numerics_optimiser::minimisers::Bfgs;
///
/// let rosenbrock = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);
/// let gradient = |p: &[f64]| {
///     vec![
///         -2.0 * (1.0 - p[0]) - 400.0 * p[0] * (p[1] - p[0] * p[0]),
///         200.0 * (p[1] - p[0] * p[0]),
///     ]
/// };
///
/// let result = Bfgs::with_defaults().minimise(rosenbrock, gradient, &[-1.2, 1.0]).unwrap();
/// assert!((result.x[0] - 1.0).abs() < 1e-4);
/// assert!((result.x[1] - 1.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bfgs {
    config: BfgsConfig,
    cancellation: Option<CancellationToken>,
}

impl Bfgs {
    /// Create a minimiser with the given configuration.
    pub fn new(config: BfgsConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Create a minimiser with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Attach a cancellation token checked once per iteration.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns a reference to the minimiser configuration.
    pub fn config(&self) -> &BfgsConfig {
        &self.config
    }

    /// Minimise `f` from `x0` using the analytic gradient `grad`.
    ///
    /// `x0` is copied; the caller's slice is never modified.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - empty or non-finite `x0`
    /// * `DimensionMismatch` - `grad` returned the wrong length
    /// * `NumericalInstability` - objective or gradient non-finite at `x0`
    /// * `LineSearchFailed` - no acceptable step, even along steepest descent
    /// * `IterationLimitExceeded` - no tolerance met within `max_iterations`
    /// * `Cancelled` - cancellation observed
    pub fn minimise<F, G>(&self, f: F, grad: G, x0: &[f64]) -> Result<VectorMinResult, NumericError>
    where
        F: Fn(&[f64]) -> f64,
        G: Fn(&[f64]) -> Vec<f64>,
    {
        ensure_non_empty("x0", x0)?;
        ensure_finite("x0", x0)?;

        let n = x0.len();
        let mut x = x0.to_vec();
        let mut value = f(&x);
        let mut g = grad(&x);
        ensure_length("Bfgs gradient", n, g.len())?;
        if !value.is_finite() || g.iter().any(|v| !v.is_finite()) {
            return Err(NumericError::NumericalInstability(
                "objective or gradient not finite at the starting point".to_string(),
            ));
        }

        let mut h = Matrix::identity(n);
        let mut scaled = false;

        for iteration in 0..=self.config.max_iterations {
            let gradient_norm = vector::norm(&g);
            tracing::trace!(iteration, value, gradient_norm, "BFGS iteration");

            if gradient_norm < self.config.gradient_tolerance {
                tracing::debug!(iteration, value, "BFGS converged on gradient");
                return Ok(VectorMinResult {
                    x,
                    value,
                    gradient_norm,
                    iterations: iteration,
                    exit_condition: ExitCondition::GradientTolerance,
                });
            }
            if iteration == self.config.max_iterations {
                break;
            }
            check_optional(self.cancellation.as_ref(), iteration)?;

            let steepest: Vec<f64> = g.iter().map(|v| -v).collect();
            let mut direction: Vec<f64> = h.mul_vec(&g)?.iter().map(|v| -v).collect();
            let descent = vector::dot(&direction, &g);
            if descent.is_nan() || descent >= 0.0 {
                tracing::warn!(iteration, "non-descent direction, resetting inverse Hessian");
                h = Matrix::identity(n);
                direction = steepest.clone();
            }

            // first step along the raw gradient is scaled to unit length
            let initial_step = if scaled { 1.0 } else { (1.0 / gradient_norm).min(1.0) };

            let attempt =
                strong_wolfe(&f, &grad, &x, &direction, value, &g, initial_step, iteration);
            let step = match attempt {
                Ok(step) => step,
                Err(err) if direction != steepest => {
                    tracing::warn!(
                        iteration,
                        error = %err,
                        "line search failed, retrying along steepest descent"
                    );
                    h = Matrix::identity(n);
                    direction = steepest;
                    strong_wolfe(
                        &f,
                        &grad,
                        &x,
                        &direction,
                        value,
                        &g,
                        (1.0 / gradient_norm).min(1.0),
                        iteration,
                    )?
                }
                Err(err) => {
                    tracing::warn!(iteration, error = %err, "line search failed");
                    return Err(err);
                }
            };
            ensure_length("Bfgs gradient", n, step.gradient.len())?;

            let s = vector::scale(&direction, step.alpha);
            let y = vector::sub(&step.gradient, &g);
            for (xi, si) in x.iter_mut().zip(&s) {
                *xi += si;
            }
            value = step.value;
            g = step.gradient;

            let step_norm = vector::norm(&s);
            if step_norm < self.config.tolerance {
                tracing::debug!(iteration, value, step_norm, "BFGS converged on step");
                return Ok(VectorMinResult {
                    gradient_norm: vector::norm(&g),
                    x,
                    value,
                    iterations: iteration + 1,
                    exit_condition: ExitCondition::StepTolerance,
                });
            }

            let sy = vector::dot(&s, &y);
            if sy <= f64::EPSILON * step_norm * vector::norm(&y) {
                tracing::debug!(iteration, sy, "skipping update, curvature not positive");
                continue;
            }
            if !scaled {
                let yy = vector::dot(&y, &y);
                h = Matrix::identity(n).scale(sy / yy);
                scaled = true;
            }
            h = bfgs_update(&h, &s, &y, sy)?;
        }

        tracing::warn!(
            iterations = self.config.max_iterations,
            "BFGS stopped at iteration limit"
        );
        Err(NumericError::IterationLimitExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Minimise `f` from `x0` using central-difference gradients.
    ///
    /// # Errors
    ///
    /// As for [`Bfgs::minimise`].
    pub fn minimise_numerical<F>(&self, f: F, x0: &[f64]) -> Result<VectorMinResult, NumericError>
    where
        F: Fn(&[f64]) -> f64,
    {
        let grad = |x: &[f64]| central_difference(&f, x);
        self.minimise(&f, grad, x0)
    }
}

/// Inverse-Hessian rank-two update, `ρ = 1 / sy`.
fn bfgs_update(h: &Matrix, s: &[f64], y: &[f64], sy: f64) -> Result<Matrix, NumericError> {
    let n = s.len();
    let rho = 1.0 / sy;
    let hy = h.mul_vec(y)?;
    let yhy = vector::dot(y, &hy);
    let ss_coeff = rho * rho * yhy + rho;

    let mut updated = h.clone();
    for i in 0..n {
        for j in 0..n {
            updated[(i, j)] += -rho * (hy[i] * s[j] + s[i] * hy[j]) + ss_coeff * s[i] * s[j];
        }
    }
    Ok(updated)
}

/// Central-difference gradient with step `ε^(1/3)·max(1, |xᵢ|)`.
fn central_difference<F>(f: &F, x: &[f64]) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let base = f64::EPSILON.cbrt();
    let mut probe = x.to_vec();
    (0..x.len())
        .map(|i| {
            let h = base * x[i].abs().max(1.0);
            probe[i] = x[i] + h;
            let forward = f(&probe);
            probe[i] = x[i] - h;
            let backward = f(&probe);
            probe[i] = x[i];
            (forward - backward) / (2.0 * h)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rosenbrock(p: &[f64]) -> f64 {
        (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2)
    }

    fn rosenbrock_grad(p: &[f64]) -> Vec<f64> {
        vec![
            -2.0 * (1.0 - p[0]) - 400.0 * p[0] * (p[1] - p[0] * p[0]),
            200.0 * (p[1] - p[0] * p[0]),
        ]
    }

    fn bowl(p: &[f64]) -> f64 {
        (p[0] - 2.0).powi(2) + 10.0 * (p[1] + 1.0).powi(2) + (p[2] - 0.5).powi(2)
    }

    fn bowl_grad(p: &[f64]) -> Vec<f64> {
        vec![2.0 * (p[0] - 2.0), 20.0 * (p[1] + 1.0), 2.0 * (p[2] - 0.5)]
    }

    #[test]
    fn test_quadratic_bowl() {
        let result = Bfgs::with_defaults()
            .minimise(bowl, bowl_grad, &[0.0, 0.0, 0.0])
            .unwrap();
        assert_abs_diff_eq!(result.x[0], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(result.x[1], -1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(result.x[2], 0.5, epsilon = 1e-8);
        assert!(result.exit_condition.is_converged());
    }

    #[test]
    fn test_rosenbrock_classic_start() {
        let result = Bfgs::with_defaults()
            .minimise(rosenbrock, rosenbrock_grad, &[-1.2, 1.0])
            .unwrap();
        assert_abs_diff_eq!(result.x[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.x[1], 1.0, epsilon = 1e-4);
        assert!(result.value < 1e-8);
    }

    #[test]
    fn test_start_at_minimum_terminates_immediately() {
        let result = Bfgs::with_defaults()
            .minimise(rosenbrock, rosenbrock_grad, &[1.0, 1.0])
            .unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.exit_condition, ExitCondition::GradientTolerance);
        assert_eq!(result.x, vec![1.0, 1.0]);
    }

    #[test]
    fn test_iteration_limit() {
        let bfgs = Bfgs::new(BfgsConfig::default().with_max_iterations(2));
        let err = bfgs
            .minimise(rosenbrock, rosenbrock_grad, &[-1.2, 1.0])
            .unwrap_err();
        assert!(err.is_iteration_limit());
    }

    #[test]
    fn test_unbounded_objective_reports_line_search_failure() {
        let f = |p: &[f64]| -p[0];
        let g = |_p: &[f64]| vec![-1.0];
        let err = Bfgs::with_defaults().minimise(f, g, &[0.0]).unwrap_err();
        assert!(matches!(
            err,
            NumericError::LineSearchFailed { iteration: 0, .. }
        ));
    }

    #[test]
    fn test_bad_gradient_length() {
        let err = Bfgs::with_defaults()
            .minimise(rosenbrock, |_p: &[f64]| vec![0.0; 3], &[0.0, 0.0])
            .unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_non_finite_start_rejected() {
        let err = Bfgs::with_defaults()
            .minimise(rosenbrock, rosenbrock_grad, &[f64::NAN, 0.0])
            .unwrap_err();
        assert!(matches!(err, NumericError::InvalidInput(_)));
    }

    #[test]
    fn test_numerical_gradient() {
        let bfgs = Bfgs::new(BfgsConfig::default().with_gradient_tolerance(1e-6));
        let result = bfgs.minimise_numerical(bowl, &[5.0, 5.0, 5.0]).unwrap();
        assert_abs_diff_eq!(result.x[0], 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(result.x[1], -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(result.x[2], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_central_difference_matches_analytic() {
        let x = [0.3, -0.7];
        let numeric = central_difference(&rosenbrock, &x);
        let analytic = rosenbrock_grad(&x);
        for (a, b) in numeric.iter().zip(&analytic) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_update_satisfies_secant_equation() {
        let h = Matrix::identity(2);
        let s = [0.5, -0.25];
        let y = [1.0, 0.5];
        let sy = vector::dot(&s, &y);
        let updated = bfgs_update(&h, &s, &y, sy).unwrap();
        let hy = updated.mul_vec(&y).unwrap();
        assert_abs_diff_eq!(hy[0], s[0], epsilon = 1e-12);
        assert_abs_diff_eq!(hy[1], s[1], epsilon = 1e-12);
    }

    #[test]
    fn test_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let err = Bfgs::with_defaults()
            .with_cancellation(token)
            .minimise(bowl, bowl_grad, &[0.0, 0.0, 0.0])
            .unwrap_err();
        assert_eq!(err, NumericError::Cancelled { iteration: 0 });
    }

    #[test]
    fn test_deterministic() {
        let bfgs = Bfgs::with_defaults();
        let a = bfgs.minimise(rosenbrock, rosenbrock_grad, &[-1.2, 1.0]);
        let b = bfgs.minimise(rosenbrock, rosenbrock_grad, &[-1.2, 1.0]);
        assert_eq!(a, b);
    }
}
