//! LU decomposition with partial pivoting.

use super::Matrix;
use crate::types::NumericError;
use crate::validation::{ensure_finite, ensure_length, ensure_square};

/// Pivot magnitude below which a matrix is treated as singular.
pub const PIVOT_THRESHOLD: f64 = 1e-20;

/// LU factorisation `P·A = L·U` of a square matrix.
///
/// `L` (unit lower triangular, diagonal implicit) and `U` share one dense
/// store. The row permutation is kept alongside so that
/// [`linear_solve`](Self::linear_solve) can replay it on the right-hand side.
/// A decomposition only exists if factorisation succeeded, so a solve can
/// never run against a failed factorisation.
///
/// # Example
///
/// ```
/// use numerics_core::math::linalg::{LuDecomposition, Matrix};
///
/// let a = Matrix::from_rows(&[
///     vec![2.0, 1.0, 1.0],
///     vec![4.0, -6.0, 0.0],
///     vec![-2.0, 7.0, 2.0],
/// ]).unwrap();
///
/// let lu = LuDecomposition::generate(&a).unwrap();
/// let x = lu.linear_solve(&[5.0, -2.0, 9.0]).unwrap();
///
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// assert!((x[2] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuDecomposition {
    /// Combined factors: strictly-lower part holds `L`, upper part holds `U`.
    lu: Matrix,
    /// `permutation[i]` is the original row now stored at row `i`.
    permutation: Vec<usize>,
    /// `+1.0` for an even number of row swaps, `-1.0` for odd.
    parity: f64,
}

impl LuDecomposition {
    /// Factor a square matrix.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` - matrix is not square
    /// * `InvalidInput` - matrix contains NaN or infinite entries
    /// * `SingularMatrix` - a pivot magnitude fell below [`PIVOT_THRESHOLD`]
    pub fn generate(matrix: &Matrix) -> Result<Self, NumericError> {
        ensure_square("LuDecomposition::generate", matrix.rows(), matrix.cols())?;
        ensure_finite("matrix", matrix.as_slice())?;

        let n = matrix.rows();
        let mut lu = matrix.clone();
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut parity = 1.0;

        for k in 0..n {
            // Partial pivoting: largest magnitude in column k at or below the diagonal
            let mut pivot_row = k;
            let mut pivot_abs = lu[(k, k)].abs();
            for i in (k + 1)..n {
                let candidate = lu[(i, k)].abs();
                if candidate > pivot_abs {
                    pivot_row = i;
                    pivot_abs = candidate;
                }
            }

            if pivot_abs < PIVOT_THRESHOLD {
                tracing::debug!(column = k, pivot = pivot_abs, "LU pivot below threshold");
                return Err(NumericError::SingularMatrix {
                    column: k,
                    pivot: pivot_abs,
                });
            }

            if pivot_row != k {
                lu.swap_rows(pivot_row, k);
                permutation.swap(pivot_row, k);
                parity = -parity;
            }

            let pivot = lu[(k, k)];
            for i in (k + 1)..n {
                let factor = lu[(i, k)] / pivot;
                lu[(i, k)] = factor;
                if factor == 0.0 {
                    continue;
                }
                for j in (k + 1)..n {
                    let u_kj = lu[(k, j)];
                    lu[(i, j)] -= factor * u_kj;
                }
            }
        }

        Ok(Self {
            lu,
            permutation,
            parity,
        })
    }

    /// Dimension of the factored matrix.
    pub fn size(&self) -> usize {
        self.lu.rows()
    }

    /// Row permutation applied during pivoting.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Solve `A·x = rhs` by forward and back substitution.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` - `rhs.len()` differs from the matrix size
    pub fn linear_solve(&self, rhs: &[f64]) -> Result<Vec<f64>, NumericError> {
        let n = self.size();
        ensure_length("LuDecomposition::linear_solve", n, rhs.len())?;

        // Forward substitution with unit-diagonal L, permutation applied
        let mut y: Vec<f64> = self.permutation.iter().map(|&p| rhs[p]).collect();
        for i in 0..n {
            let mut sum = y[i];
            for j in 0..i {
                sum -= self.lu[(i, j)] * y[j];
            }
            y[i] = sum;
        }

        // Back substitution with U
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= self.lu[(i, j)] * x[j];
            }
            x[i] = sum / self.lu[(i, i)];
        }

        Ok(x)
    }

    /// Solve `A·X = B` column by column.
    pub fn solve_matrix(&self, rhs: &Matrix) -> Result<Matrix, NumericError> {
        let n = self.size();
        ensure_length("LuDecomposition::solve_matrix", n, rhs.rows())?;

        let mut out = Matrix::zeros(n, rhs.cols());
        for j in 0..rhs.cols() {
            let column = self.linear_solve(&rhs.column(j))?;
            for (i, value) in column.into_iter().enumerate() {
                out[(i, j)] = value;
            }
        }
        Ok(out)
    }

    /// Inverse of the factored matrix.
    pub fn inverse(&self) -> Result<Matrix, NumericError> {
        self.solve_matrix(&Matrix::identity(self.size()))
    }

    /// Determinant of the factored matrix.
    pub fn determinant(&self) -> f64 {
        (0..self.size()).fold(self.parity, |det, i| det * self.lu[(i, i)])
    }

    /// Unit lower-triangular factor `L`.
    pub fn lower(&self) -> Matrix {
        let n = self.size();
        let mut l = Matrix::identity(n);
        for i in 0..n {
            for j in 0..i {
                l[(i, j)] = self.lu[(i, j)];
            }
        }
        l
    }

    /// Upper-triangular factor `U`.
    pub fn upper(&self) -> Matrix {
        let n = self.size();
        let mut u = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                u[(i, j)] = self.lu[(i, j)];
            }
        }
        u
    }
}
