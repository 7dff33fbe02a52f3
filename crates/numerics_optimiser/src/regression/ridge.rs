//! Ridge (Tikhonov) regression.

use numerics_core::math::linalg::{LuDecomposition, Matrix};
use numerics_core::NumericError;

use super::{validate_design, RegressionFit};

/// Ridge estimator `β = (XᵗX + λI)⁻¹ Xᵗy`.
///
/// `λ = 0` gives ordinary least squares.
///
/// # Example
///
/// ```
/// use numerics_core::math::linalg::Matrix;
/// use numerics_optimiser::regression::RidgeRegression;
///
/// // y = 1 + 2t
/// let x = Matrix::from_rows(&[
///     vec![1.0, 0.0],
///     vec![1.0, 1.0],
///     vec![1.0, 2.0],
///     vec![1.0, 3.0],
/// ])
/// .unwrap();
/// let y = [1.0, 3.0, 5.0, 7.0];
///
/// let fit = RidgeRegression::new(0.0).fit(&x, &y).unwrap();
/// assert!((fit.coefficients[0] - 1.0).abs() < 1e-10);
/// assert!((fit.coefficients[1] - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RidgeRegression {
    lambda: f64,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self { lambda: 1e-3 }
    }
}

impl RidgeRegression {
    /// Create a ridge estimator with regularisation strength `lambda`.
    ///
    /// # Panics
    ///
    /// Panics if `lambda` is negative or not finite.
    pub fn new(lambda: f64) -> Self {
        assert!(
            lambda >= 0.0 && lambda.is_finite(),
            "lambda must be non-negative and finite"
        );
        Self { lambda }
    }

    /// Regularisation strength.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Fit coefficients for design `x` and response `y`.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - empty or non-finite data
    /// * `DimensionMismatch` - `x.rows() != y.len()`
    /// * `SingularMatrix` - `XᵗX + λI` is singular
    pub fn fit(&self, x: &Matrix, y: &[f64]) -> Result<RegressionFit, NumericError> {
        validate_design("RidgeRegression::fit", x, y)?;

        let normal = x.gram_ridge(self.lambda);
        let rhs = x.transpose_mul_vec(y)?;
        let lu = LuDecomposition::generate(&normal).map_err(|e| {
            tracing::warn!(lambda = self.lambda, error = %e, "ridge normal equations singular");
            e
        })?;
        let coefficients = lu.linear_solve(&rhs)?;

        tracing::debug!(lambda = self.lambda, columns = x.cols(), "ridge fit complete");
        RegressionFit::new(x, y, coefficients, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn design() -> (Matrix, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                let t = i as f64;
                vec![1.0, t, (t * 0.7).sin()]
            })
            .collect();
        let y: Vec<f64> = rows
            .iter()
            .map(|r| 0.5 + 1.5 * r[1] - 2.0 * r[2])
            .collect();
        (Matrix::from_rows(&rows).unwrap(), y)
    }

    #[test]
    fn test_zero_lambda_recovers_exact_coefficients() {
        let (x, y) = design();
        let fit = RidgeRegression::new(0.0).fit(&x, &y).unwrap();
        assert_abs_diff_eq!(fit.coefficients[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.coefficients[1], 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.coefficients[2], -2.0, epsilon = 1e-9);
        assert!(fit.residual_ss < 1e-16);
        assert_eq!(fit.iterations, 0);
    }

    #[test]
    fn test_shrinkage_grows_with_lambda() {
        let (x, y) = design();
        let norm = |lambda: f64| {
            let fit = RidgeRegression::new(lambda).fit(&x, &y).unwrap();
            fit.coefficients.iter().map(|b| b * b).sum::<f64>()
        };
        assert!(norm(10.0) < norm(0.1));
        assert!(norm(1000.0) < norm(10.0));
    }

    #[test]
    fn test_collinear_design_is_singular_without_penalty() {
        let x = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0], vec![3.0, 6.0]]).unwrap();
        let y = [1.0, 2.0, 3.0];

        let err = RidgeRegression::new(0.0).fit(&x, &y).unwrap_err();
        assert!(err.is_singular());
        assert!(RidgeRegression::new(1.0).fit(&x, &y).is_ok());
    }

    #[test]
    fn test_shape_mismatch() {
        let (x, _) = design();
        let err = RidgeRegression::default().fit(&x, &[1.0, 2.0]).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    #[should_panic(expected = "lambda must be non-negative")]
    fn test_negative_lambda_panics() {
        let _ = RidgeRegression::new(-1.0);
    }
}
