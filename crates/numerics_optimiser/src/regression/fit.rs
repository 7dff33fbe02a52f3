use numerics_core::math::linalg::{vector, Matrix};
use numerics_core::NumericError;

/// Fitted regression coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegressionFit {
    /// Coefficient vector `β`, one entry per design column.
    pub coefficients: Vec<f64>,
    /// Residual sum of squares `‖y - Xβ‖²`.
    pub residual_ss: f64,
    /// Coordinate-descent sweeps; zero for closed-form fits.
    pub iterations: usize,
}

impl RegressionFit {
    pub(crate) fn new(
        x: &Matrix,
        y: &[f64],
        coefficients: Vec<f64>,
        iterations: usize,
    ) -> Result<Self, NumericError> {
        let fitted = x.mul_vec(&coefficients)?;
        let residual = vector::sub(y, &fitted);
        Ok(Self {
            residual_ss: vector::dot(&residual, &residual),
            coefficients,
            iterations,
        })
    }

    /// Predicted responses `Xβ` for a new design matrix.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` - `x.cols()` differs from the coefficient count
    pub fn predict(&self, x: &Matrix) -> Result<Vec<f64>, NumericError> {
        x.mul_vec(&self.coefficients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residual_and_predict() {
        let x = Matrix::from_rows(&[vec![1.0, 0.0], vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let y = [1.0, 2.0, 4.0];
        let fit = RegressionFit::new(&x, &y, vec![1.0, 1.0], 0).unwrap();

        // residuals (0, 0, 1)
        assert_eq!(fit.residual_ss, 1.0);
        assert_eq!(fit.predict(&x).unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(fit.predict(&Matrix::zeros(1, 3)).is_err());
    }
}
