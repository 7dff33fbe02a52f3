//! Scalar Newton-Raphson root-finding solver.

use num_traits::Float;

use super::SolverConfig;
use crate::cancel::{check_optional, CancellationToken};
use crate::types::NumericError;

/// Newton-Raphson root finder for `f: R -> R`.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)`, which converges
/// quadratically near a simple root. It fails when the derivative vanishes,
/// the iterate leaves the finite range, or the iteration cap is reached.
///
/// # Example
///
/// ```
/// use numerics_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
    cancellation: Option<CancellationToken>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Attach a cancellation token checked once per iteration.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(NumericError::IterationLimitExceeded)` - Failed to converge
    /// * `Err(NumericError::DerivativeNearZero)` - Derivative too small
    /// * `Err(NumericError::NumericalInstability)` - Iterate became non-finite
    /// * `Err(NumericError::Cancelled)` - Cancellation observed
    ///
    /// # Example
    ///
    /// ```
    /// use numerics_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let root = solver.find_root(f, f_prime, 1.5).unwrap();
    /// assert!((f(root)).abs() < 1e-10);
    /// ```
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, NumericError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = x0;
        let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);

        for iteration in 0..self.config.max_iterations {
            check_optional(self.cancellation.as_ref(), iteration)?;

            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                tracing::debug!(iteration, "scalar Newton converged");
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < epsilon {
                return Err(NumericError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = x - f_val / f_prime_val;

            if !x.is_finite() {
                return Err(NumericError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(NumericError::IterationLimitExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
