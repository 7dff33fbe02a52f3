//! Golden-section search for unimodal scalar functions.
//!
//! # Algorithm
//!
//! Two interior probes split `[a, b]` in golden-ratio proportion. The
//! sub-interval on the side of the larger probe value is discarded and the
//! surviving probe is reused, so each iteration costs one evaluation and
//! shrinks the bracket by `1/φ ≈ 0.618`.

use numerics_core::cancel::{check_optional, CancellationToken};
use numerics_core::validation::ensure_finite_scalar;
use numerics_core::NumericError;

use super::{ExitCondition, ScalarMinResult};

/// `1/φ = (√5 - 1) / 2`
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Configuration for [`GoldenSectionSearch`].
///
/// # Examples
///
/// ```
/// use numerics_optimiser::minimisers::GoldenSectionConfig;
///
/// let config = GoldenSectionConfig::default();
/// assert_eq!(config.tolerance, 1e-10);
/// assert_eq!(config.max_iterations, 200);
///
/// let custom = GoldenSectionConfig::new(1e-6, 50);
/// assert_eq!(custom.max_iterations, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldenSectionConfig {
    /// Absolute bracket width at which the search stops.
    pub tolerance: f64,
    /// Maximum number of bracket reductions.
    pub max_iterations: usize,
}

impl Default for GoldenSectionConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }
}

impl GoldenSectionConfig {
    /// Create a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Set the bracket tolerance.
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

/// Golden-section minimiser.
///
/// Reaching the iteration cap is not an error: the best probe is returned
/// with [`ExitCondition::IterationLimit`].
///
/// # Example
///
/// ```
/// use numerics_optimiser::minimisers::{ExitCondition, GoldenSectionSearch};
///
/// let search = GoldenSectionSearch::with_defaults();
/// let result = search.minimise(|x| (x - 1.5).powi(2), 0.0, 4.0).unwrap();
///
/// assert!((result.x - 1.5).abs() < 1e-8);
/// assert_eq!(result.exit_condition, ExitCondition::BoundTolerance);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoldenSectionSearch {
    config: GoldenSectionConfig,
    cancellation: Option<CancellationToken>,
}

impl GoldenSectionSearch {
    /// Create a search with the given configuration.
    pub fn new(config: GoldenSectionConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Create a search with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Attach a cancellation token checked once per iteration.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns a reference to the search configuration.
    pub fn config(&self) -> &GoldenSectionConfig {
        &self.config
    }

    /// Minimise `f` on `[lower, upper]`.
    ///
    /// NaN objective values are ranked above every finite value.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - non-finite bounds or `lower >= upper`
    /// * `Cancelled` - cancellation observed
    pub fn minimise<F>(&self, f: F, lower: f64, upper: f64) -> Result<ScalarMinResult, NumericError>
    where
        F: Fn(f64) -> f64,
    {
        ensure_finite_scalar("lower", lower)?;
        ensure_finite_scalar("upper", upper)?;
        if lower >= upper {
            return Err(NumericError::InvalidInput(format!(
                "lower bound {} must be below upper bound {}",
                lower, upper
            )));
        }

        let eval = |x: f64| {
            let v = f(x);
            if v.is_nan() {
                f64::INFINITY
            } else {
                v
            }
        };

        let (mut a, mut b) = (lower, upper);
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = eval(c);
        let mut fd = eval(d);

        let mut best = if fc <= fd { (c, fc) } else { (d, fd) };

        for iteration in 0..self.config.max_iterations {
            if b - a <= self.config.tolerance {
                tracing::debug!(iteration, x = best.0, "golden section converged");
                return Ok(self.result(best, iteration, ExitCondition::BoundTolerance));
            }
            check_optional(self.cancellation.as_ref(), iteration)?;

            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = eval(c);
                if fc < best.1 {
                    best = (c, fc);
                }
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = eval(d);
                if fd < best.1 {
                    best = (d, fd);
                }
            }
            tracing::trace!(iteration, a, b, "golden section bracket");
        }

        let exit_condition = if b - a <= self.config.tolerance {
            ExitCondition::BoundTolerance
        } else {
            tracing::warn!(
                iterations = self.config.max_iterations,
                width = b - a,
                "golden section stopped at iteration limit"
            );
            ExitCondition::IterationLimit
        };
        Ok(self.result(best, self.config.max_iterations, exit_condition))
    }

    /// Maximise `f` on `[lower, upper]` by minimising `-f`.
    ///
    /// The reported `value` is `f(x)`, not its negation.
    pub fn maximise<F>(&self, f: F, lower: f64, upper: f64) -> Result<ScalarMinResult, NumericError>
    where
        F: Fn(f64) -> f64,
    {
        let mut result = self.minimise(|x| -f(x), lower, upper)?;
        result.value = -result.value;
        Ok(result)
    }

    fn result(
        &self,
        best: (f64, f64),
        iterations: usize,
        exit_condition: ExitCondition,
    ) -> ScalarMinResult {
        ScalarMinResult {
            x: best.0,
            value: best.1,
            iterations,
            exit_condition,
        }
    }
}
