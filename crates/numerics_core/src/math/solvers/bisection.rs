//! Bisection root-finding solver.

use num_traits::Float;

use super::SolverConfig;
use crate::cancel::{check_optional, CancellationToken};
use crate::types::NumericError;

/// Bisection root finder.
///
/// Halves a sign-changing bracket `[a, b]` each iteration. Slower than
/// Newton but needs no derivative and cannot diverge once a bracket exists.
///
/// # Example
///
/// ```
/// use numerics_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let root = solver.find_root(f, 0.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
    cancellation: Option<CancellationToken>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
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

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// Endpoints may be given in either order.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - midpoint once `|f(x)| < tolerance` or the half-width is at most `tolerance`
    /// * `Err(NumericError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(NumericError::InvalidInput)` - non-finite endpoint
    /// * `Err(NumericError::IterationLimitExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, NumericError>
    where
        F: Fn(T) -> T,
    {
        if !a.is_finite() || !b.is_finite() {
            return Err(NumericError::InvalidInput(
                "bisection bracket must be finite".to_string(),
            ));
        }

        let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
        let mut f_lo = f(lo);
        let f_hi = f(hi);

        if f_lo == T::zero() {
            return Ok(lo);
        }
        if f_hi == T::zero() {
            return Ok(hi);
        }
        if f_lo * f_hi > T::zero() {
            return Err(NumericError::NoBracket {
                a: lo.to_f64().unwrap_or(f64::NAN),
                b: hi.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::one() + T::one();
        for iteration in 0..self.config.max_iterations {
            check_optional(self.cancellation.as_ref(), iteration)?;

            let mid = lo + (hi - lo) / two;
            let f_mid = f(mid);
            let half_width = (hi - lo) / two;

            if f_mid.abs() < self.config.tolerance || half_width <= self.config.tolerance {
                tracing::debug!(iteration, "bisection converged");
                return Ok(mid);
            }

            if f_lo * f_mid < T::zero() {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_root() {
        let solver = BisectionSolver::new(SolverConfig::default());
        let f = |x: f64| x * x * x - x - 2.0;

        let root = solver.find_root(f, 1.0, 2.0).unwrap();
        assert!((root - 1.521_379_706_804_567_6).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_bracket() {
        let solver = BisectionSolver::new(SolverConfig::default());
        let root = solver.find_root(|x: f64| x - 0.25, 1.0, 0.0).unwrap();
        assert!((root - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_endpoint_root() {
        let solver = BisectionSolver::new(SolverConfig::default());
        assert_eq!(solver.find_root(|x: f64| x, 0.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_no_bracket() {
        let solver = BisectionSolver::new(SolverConfig::default());
        let err = solver.find_root(|x: f64| x * x + 1.0, -1.0, 1.0).unwrap_err();
        assert_eq!(err, NumericError::NoBracket { a: -1.0, b: 1.0 });
    }

    #[test]
    fn test_infinite_bracket_rejected() {
        let solver = BisectionSolver::new(SolverConfig::default());
        let err = solver
            .find_root(|x: f64| x, f64::NEG_INFINITY, 1.0)
            .unwrap_err();
        assert!(matches!(err, NumericError::InvalidInput(_)));
    }

    #[test]
    fn test_iteration_limit() {
        let solver = BisectionSolver::new(SolverConfig::new(1e-15, 5));
        let err = solver.find_root(|x: f64| x - 0.3, 0.0, 1.0).unwrap_err();
        assert!(err.is_iteration_limit());
    }
}
