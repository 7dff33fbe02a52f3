//! Solver configuration types.

use num_traits::Float;

/// Configuration for scalar root finders.
///
/// Shared by [`super::NewtonRaphsonSolver`] and [`super::BisectionSolver`].
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use numerics_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert_eq!(config.max_iterations, 100);
///
/// let custom = SolverConfig::new(1e-12, 200);
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// Newton stops when `|f(x)| < tolerance`; bisection additionally stops
    /// once the bracket half-width is at most `tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up with
    /// `NumericError::IterationLimitExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10, or `8 * T::epsilon()` if that is larger
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: attainable_tolerance(1e-10),
            max_iterations: 100,
        }
    }
}

/// `requested` clamped from below to a few ulps of `T`, so that presets stay
/// reachable in single precision.
fn attainable_tolerance<T: Float>(requested: f64) -> T {
    let floor = T::epsilon() * T::from(8.0).unwrap_or_else(T::one);
    T::from(requested).map_or(floor, |t| t.max(floor))
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Tight tolerance (1e-14, floored at `8 * T::epsilon()`) and 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: attainable_tolerance(1e-14),
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) and 50 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: attainable_tolerance(1e-6),
            max_iterations: 50,
        }
    }
}

/// Configuration for the multi-dimensional Newton-Raphson solver.
///
/// # Example
///
/// ```
/// use numerics_core::math::solvers::VectorNewtonConfig;
///
/// let config = VectorNewtonConfig::default();
/// assert_eq!(config.max_iterations, 100);
/// assert_eq!(config.step_tolerance, 1e-8);
/// assert_eq!(config.function_tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorNewtonConfig {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Converged once the L1 norm of the Newton step falls below this.
    pub step_tolerance: f64,
    /// Converged once the L1 norm of `f(x)` is at most this.
    pub function_tolerance: f64,
}

impl Default for VectorNewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            step_tolerance: 1e-8,
            function_tolerance: 1e-8,
        }
    }
}

impl VectorNewtonConfig {
    /// Create a configuration with explicit values.
    ///
    /// # Panics
    ///
    /// Panics if either tolerance is negative or `max_iterations == 0`.
    pub fn new(max_iterations: usize, step_tolerance: f64, function_tolerance: f64) -> Self {
        assert!(max_iterations > 0, "max_iterations must be > 0");
        assert!(step_tolerance >= 0.0, "step_tolerance must be non-negative");
        assert!(
            function_tolerance >= 0.0,
            "function_tolerance must be non-negative"
        );
        Self {
            max_iterations,
            step_tolerance,
            function_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_negative_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(-1e-10, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_presets() {
        let precise: SolverConfig<f64> = SolverConfig::high_precision();
        let fast: SolverConfig<f64> = SolverConfig::fast();
        assert!(precise.tolerance < fast.tolerance);
        assert!(precise.max_iterations > fast.max_iterations);
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance >= 8.0 * f32::EPSILON);
        assert!(config.tolerance < 1e-5);

        // f64 keeps the requested values
        let precise: SolverConfig<f64> = SolverConfig::high_precision();
        assert_eq!(precise.tolerance, 1e-14);
        let precise: SolverConfig<f32> = SolverConfig::high_precision();
        assert_eq!(precise.tolerance, 8.0 * f32::EPSILON);
    }

    #[test]
    fn test_vector_newton_defaults() {
        let config = VectorNewtonConfig::default();
        assert_eq!(config, VectorNewtonConfig::new(100, 1e-8, 1e-8));
    }

    #[test]
    #[should_panic(expected = "step_tolerance must be non-negative")]
    fn test_vector_newton_negative_tolerance_panics() {
        let _ = VectorNewtonConfig::new(10, -1.0, 1e-8);
    }
}
