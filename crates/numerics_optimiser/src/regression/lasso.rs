//! Lasso regression by cyclic coordinate descent.
//!
//! # Algorithm
//!
//! Minimises `‖y - Xβ‖² + λ‖β‖₁`. Each sweep visits every coordinate `j`
//! once and sets
//!
//! ```text
//! ρⱼ = xⱼᵗ (r + xⱼ βⱼ)
//! βⱼ = S(ρⱼ, λ/2) / ‖xⱼ‖²
//! ```
//!
//! where `r = y - Xβ` is kept up to date incrementally and `S` is the
//! soft-threshold operator. Sweeps stop once the largest coefficient change
//! falls below the tolerance.

use numerics_core::cancel::{check_optional, CancellationToken};
use numerics_core::math::linalg::{vector, Matrix};
use numerics_core::NumericError;

use super::{validate_design, RegressionFit};

/// Soft-threshold operator `S(z, γ) = sign(z) · max(|z| - γ, 0)`.
///
/// # Examples
/// ```
/// use numerics_optimiser::regression::soft_threshold;
///
/// assert_eq!(soft_threshold(3.0, 1.0), 2.0);
/// assert_eq!(soft_threshold(-3.0, 1.0), -2.0);
/// assert_eq!(soft_threshold(0.5, 1.0), 0.0);
/// ```
#[inline]
pub fn soft_threshold(z: f64, gamma: f64) -> f64 {
    if z > gamma {
        z - gamma
    } else if z < -gamma {
        z + gamma
    } else {
        0.0
    }
}

/// Lasso estimator.
///
/// # Example
///
/// ```
/// use numerics_core::math::linalg::Matrix;
/// use numerics_optimiser::regression::LassoRegression;
///
/// let x = Matrix::from_rows(&[
///     vec![1.0, 0.0],
///     vec![0.0, 1.0],
///     vec![1.0, 1.0],
/// ])
/// .unwrap();
/// let y = [2.0, 0.01, 2.01];
///
/// // A large penalty zeroes the weak coefficient
/// let fit = LassoRegression::new(1.0).fit(&x, &y).unwrap();
/// assert!(fit.coefficients[0] > 1.0);
/// assert_eq!(fit.coefficients[1], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct LassoRegression {
    lambda: f64,
    tolerance: f64,
    max_iterations: usize,
    cancellation: Option<CancellationToken>,
}

impl Default for LassoRegression {
    fn default() -> Self {
        Self {
            lambda: 1e-3,
            tolerance: 1e-10,
            max_iterations: 10_000,
            cancellation: None,
        }
    }
}

impl LassoRegression {
    /// Create a lasso estimator with penalty `lambda`.
    ///
    /// # Panics
    ///
    /// Panics if `lambda` is negative or not finite.
    pub fn new(lambda: f64) -> Self {
        assert!(
            lambda >= 0.0 && lambda.is_finite(),
            "lambda must be non-negative and finite"
        );
        Self {
            lambda,
            ..Self::default()
        }
    }

    /// Set the coefficient-change tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        self.tolerance = tolerance;
        self
    }

    /// Set the sweep cap.
    ///
    /// # Panics
    ///
    /// Panics if `max_iterations == 0`.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        self.max_iterations = max_iterations;
        self
    }

    /// Attach a cancellation token checked once per sweep.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Penalty strength.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Coefficient-change tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Sweep cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Fit coefficients for design `x` and response `y`, starting from `β = 0`.
    ///
    /// Columns with zero norm always receive a zero coefficient.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - empty or non-finite data
    /// * `DimensionMismatch` - `x.rows() != y.len()`
    /// * `IterationLimitExceeded` - coefficients still moving after `max_iterations` sweeps
    /// * `Cancelled` - cancellation observed
    pub fn fit(&self, x: &Matrix, y: &[f64]) -> Result<RegressionFit, NumericError> {
        validate_design("LassoRegression::fit", x, y)?;

        let p = x.cols();
        let columns: Vec<Vec<f64>> = (0..p).map(|j| x.column(j)).collect();
        let column_norms: Vec<f64> = columns.iter().map(|c| vector::dot(c, c)).collect();
        let gamma = 0.5 * self.lambda;

        let mut beta = vec![0.0; p];
        let mut residual = y.to_vec();

        for iteration in 0..self.max_iterations {
            check_optional(self.cancellation.as_ref(), iteration)?;

            let mut max_change: f64 = 0.0;
            for j in 0..p {
                if column_norms[j] == 0.0 {
                    continue;
                }
                let column = &columns[j];
                let rho = vector::dot(column, &residual) + column_norms[j] * beta[j];
                let updated = soft_threshold(rho, gamma) / column_norms[j];
                let change = updated - beta[j];
                if change != 0.0 {
                    for (r, c) in residual.iter_mut().zip(column) {
                        *r -= c * change;
                    }
                    beta[j] = updated;
                }
                max_change = max_change.max(change.abs());
            }

            tracing::trace!(iteration, max_change, "lasso sweep");
            if max_change < self.tolerance {
                tracing::debug!(sweeps = iteration + 1, lambda = self.lambda, "lasso converged");
                return RegressionFit::new(x, y, beta, iteration + 1);
            }
        }

        tracing::warn!(
            sweeps = self.max_iterations,
            lambda = self.lambda,
            "lasso stopped at iteration limit"
        );
        Err(NumericError::IterationLimitExceeded {
            iterations: self.max_iterations,
        })
    }
}
