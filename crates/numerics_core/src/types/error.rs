//! Error types for structured error handling.
//!
//! This module provides:
//! - `NumericError`: the failure taxonomy shared by every fallible
//!   operation in the workspace (linear algebra, root finding,
//!   minimisation and regression)

use thiserror::Error;

/// Numerical operation errors.
///
/// Every expected failure mode of the workspace is returned as one of these
/// variants; none of them is raised as a panic.
///
/// # Variants
/// - `DimensionMismatch`: Incompatible matrix/vector shapes
/// - `SingularMatrix`: LU factorisation met a near-zero pivot
/// - `DecompositionFailed`: Newton iteration could not factor the Jacobian
/// - `IterationLimitExceeded`: Iterative method did not converge in time
/// - `LineSearchFailed`: No step satisfied the Wolfe conditions
/// - `DerivativeNearZero`: Scalar Newton derivative vanished
/// - `NoBracket`: Bisection endpoints do not bracket a root
/// - `InvalidInput`: Data rejected at entry (empty, NaN, bad bounds)
/// - `NumericalInstability`: Iterate became non-finite
/// - `Cancelled`: Cancellation token observed between iterations
///
/// # Examples
/// ```
/// use numerics_core::types::NumericError;
///
/// let err = NumericError::IterationLimitExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("Dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Operation that rejected its operands
        operation: String,
        /// Shape the operation required
        expected: String,
        /// Shape that was supplied
        found: String,
    },

    /// Pivot magnitude fell below the singularity threshold.
    #[error("Singular matrix: pivot {pivot:e} at column {column}")]
    SingularMatrix {
        /// Column at which elimination broke down
        column: usize,
        /// Largest available pivot magnitude
        pivot: f64,
    },

    /// Jacobian could not be factored during a Newton iteration.
    #[error("Jacobian decomposition failed at iteration {iteration}: {reason}")]
    DecompositionFailed {
        /// Iteration at which the factorisation failed
        iteration: usize,
        /// Description of the underlying factorisation failure
        reason: String,
    },

    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    IterationLimitExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Line search could not find an acceptable step length.
    #[error("Line search failed at iteration {iteration} after {attempts} trial steps")]
    LineSearchFailed {
        /// Outer iteration of the minimiser
        iteration: usize,
        /// Trial steps evaluated before giving up
        attempts: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Computation was cancelled by its caller.
    #[error("Cancelled at iteration {iteration}")]
    Cancelled {
        /// Iteration at which cancellation was observed
        iteration: usize,
    },
}

impl NumericError {
    /// Create a dimension mismatch error.
    ///
    /// # Arguments
    /// * `operation` - Name of the rejecting operation
    /// * `expected` - Required shape, e.g. `"3x3"`
    /// * `found` - Supplied shape
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        NumericError::DimensionMismatch {
            operation: operation.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NumericError::DimensionMismatch { .. } => "DimensionMismatch",
            NumericError::SingularMatrix { .. } => "SingularMatrix",
            NumericError::DecompositionFailed { .. } => "DecompositionFailed",
            NumericError::IterationLimitExceeded { .. } => "IterationLimitExceeded",
            NumericError::LineSearchFailed { .. } => "LineSearchFailed",
            NumericError::DerivativeNearZero { .. } => "DerivativeNearZero",
            NumericError::NoBracket { .. } => "NoBracket",
            NumericError::InvalidInput(_) => "InvalidInput",
            NumericError::NumericalInstability(_) => "NumericalInstability",
            NumericError::Cancelled { .. } => "Cancelled",
        }
    }

    /// Diagnostic detail lines attached to the error.
    ///
    /// Used as the ancillary record of an [`crate::types::ErrorResult`].
    pub fn ancillary(&self) -> Vec<String> {
        match self {
            NumericError::DimensionMismatch {
                operation,
                expected,
                found,
            } => vec![
                format!("operation: {}", operation),
                format!("expected: {}", expected),
                format!("found: {}", found),
            ],
            NumericError::SingularMatrix { column, pivot } => vec![
                format!("column: {}", column),
                format!("pivot: {:e}", pivot),
            ],
            NumericError::DecompositionFailed { iteration, reason } => vec![
                format!("iteration: {}", iteration),
                format!("reason: {}", reason),
            ],
            NumericError::IterationLimitExceeded { iterations } => {
                vec![format!("iterations: {}", iterations)]
            }
            NumericError::LineSearchFailed {
                iteration,
                attempts,
            } => vec![
                format!("iteration: {}", iteration),
                format!("attempts: {}", attempts),
            ],
            NumericError::DerivativeNearZero { x } => vec![format!("x: {}", x)],
            NumericError::NoBracket { a, b } => vec![format!("a: {}", a), format!("b: {}", b)],
            NumericError::InvalidInput(_) | NumericError::NumericalInstability(_) => Vec::new(),
            NumericError::Cancelled { iteration } => vec![format!("iteration: {}", iteration)],
        }
    }

    /// Check if the error reports non-convergence.
    pub fn is_iteration_limit(&self) -> bool {
        matches!(self, NumericError::IterationLimitExceeded { .. })
    }

    /// Check if the error reports a shape problem.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, NumericError::DimensionMismatch { .. })
    }

    /// Check if the error originates from a singular factorisation.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            NumericError::SingularMatrix { .. } | NumericError::DecompositionFailed { .. }
        )
    }
}
