//! Regularised linear regression.
//!
//! Both estimators fit `y ≈ Xβ` for a design matrix `X` (one row per
//! observation) and return a [`RegressionFit`].
//!
//! - [`RidgeRegression`]: closed form `β = (XᵗX + λI)⁻¹ Xᵗy`
//! - [`LassoRegression`]: cyclic coordinate descent on
//!   `‖y - Xβ‖² + λ‖β‖₁`

mod fit;
mod lasso;
mod ridge;

pub use fit::RegressionFit;
pub use lasso::{soft_threshold, LassoRegression};
pub use ridge::RidgeRegression;

use numerics_core::math::linalg::Matrix;
use numerics_core::validation::{ensure_finite, ensure_length, ensure_non_empty};
use numerics_core::NumericError;

/// Shared entry checks for both estimators.
fn validate_design(operation: &str, x: &Matrix, y: &[f64]) -> Result<(), NumericError> {
    ensure_non_empty("y", y)?;
    if x.cols() == 0 {
        return Err(NumericError::InvalidInput(
            "design matrix has no columns".to_string(),
        ));
    }
    ensure_length(operation, x.rows(), y.len())?;
    ensure_finite("x", x.as_slice())?;
    ensure_finite("y", y)
}
