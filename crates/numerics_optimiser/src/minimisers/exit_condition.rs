//! Minimiser result records.

use std::fmt;

/// Why a minimiser stopped.
///
/// Every successful minimisation result carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitCondition {
    /// Bracket width fell to the tolerance.
    BoundTolerance,
    /// Iteration cap reached before any tolerance was met.
    IterationLimit,
    /// Change in objective value fell below tolerance.
    FunctionTolerance,
    /// Gradient norm fell below tolerance.
    GradientTolerance,
    /// Step length fell below tolerance.
    StepTolerance,
}

impl ExitCondition {
    /// `true` for every condition other than [`ExitCondition::IterationLimit`].
    pub fn is_converged(&self) -> bool {
        !matches!(self, ExitCondition::IterationLimit)
    }
}

impl fmt::Display for ExitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExitCondition::BoundTolerance => "bound tolerance",
            ExitCondition::IterationLimit => "iteration limit",
            ExitCondition::FunctionTolerance => "function tolerance",
            ExitCondition::GradientTolerance => "gradient tolerance",
            ExitCondition::StepTolerance => "step tolerance",
        };
        f.write_str(name)
    }
}

/// Result of a scalar minimisation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarMinResult {
    /// Best point found.
    pub x: f64,
    /// Objective value at `x`.
    pub value: f64,
    /// Bracket reductions performed.
    pub iterations: usize,
    /// Stopping criterion.
    pub exit_condition: ExitCondition,
}

/// Result of a vector minimisation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorMinResult {
    /// Minimiser estimate.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub value: f64,
    /// Euclidean norm of the gradient at `x`.
    pub gradient_norm: f64,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Stopping criterion.
    pub exit_condition: ExitCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_iteration_limit_is_unconverged() {
        assert!(!ExitCondition::IterationLimit.is_converged());
        assert!(ExitCondition::BoundTolerance.is_converged());
        assert!(ExitCondition::GradientTolerance.is_converged());
        assert!(ExitCondition::StepTolerance.is_converged());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCondition::BoundTolerance.to_string(), "bound tolerance");
        assert_eq!(ExitCondition::IterationLimit.to_string(), "iteration limit");
    }
}
