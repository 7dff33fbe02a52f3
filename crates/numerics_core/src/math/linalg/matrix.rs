//! Dense row-major matrix.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::LuDecomposition;
use crate::types::NumericError;

/// Dense `f64` matrix stored in row-major order.
///
/// All arithmetic is pure: every operation validates operand shapes, then
/// returns a newly allocated result.
///
/// # Example
///
/// ```
/// use numerics_core::math::linalg::Matrix;
///
/// let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let at = a.transpose();
/// assert_eq!(at[(0, 1)], 3.0);
///
/// let product = a.mul(&at).unwrap();
/// assert_eq!(product[(0, 0)], 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Build a matrix from a row-major buffer.
    ///
    /// Fails with `DimensionMismatch` when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, NumericError> {
        if data.len() != rows * cols {
            return Err(NumericError::dimension_mismatch(
                "Matrix::from_vec",
                format!("{} elements", rows * cols),
                format!("{} elements", data.len()),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from a slice of rows.
    ///
    /// Fails with `DimensionMismatch` on ragged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, NumericError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(NumericError::dimension_mismatch(
                    "Matrix::from_rows",
                    format!("{} columns", n_cols),
                    format!("{} columns in row {}", row.len(), i),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Build an `n x 1` column matrix.
    pub fn column_vector(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `true` when `rows == cols`.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Shape formatted as `"RxC"`, used in error messages.
    pub fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    /// Element at `(row, col)`, or `None` out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self[(row, col)] = value;
    }

    /// Borrow a row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Exchange two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// Copy a column into a new vector.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self[(i, col)]).collect()
    }

    /// Row-major view of the underlying storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Copy out as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Matrix transpose.
    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        t
    }

    /// Element-wise sum `self + other`.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, NumericError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(NumericError::dimension_mismatch(
                "Matrix::add",
                self.shape(),
                other.shape(),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Scalar multiple `factor * self`.
    pub fn scale(&self, factor: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix, NumericError> {
        if self.cols != other.rows {
            return Err(NumericError::dimension_mismatch(
                "Matrix::mul",
                format!("{} rows in right operand", self.cols),
                format!("{} rows", other.rows),
            ));
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.data[i * self.cols + k];
                if a_ik == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    out.data[i * other.cols + j] += a_ik * other.data[k * other.cols + j];
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, NumericError> {
        if self.cols != v.len() {
            return Err(NumericError::dimension_mismatch(
                "Matrix::mul_vec",
                format!("length {}", self.cols),
                format!("length {}", v.len()),
            ));
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Transposed product `selfᵗ * v`.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, NumericError> {
        if self.rows != v.len() {
            return Err(NumericError::dimension_mismatch(
                "Matrix::transpose_mul_vec",
                format!("length {}", self.rows),
                format!("length {}", v.len()),
            ));
        }
        let mut out = vec![0.0; self.cols];
        for (i, &vi) in v.iter().enumerate() {
            for (o, a) in out.iter_mut().zip(self.row(i)) {
                *o += a * vi;
            }
        }
        Ok(out)
    }

    /// Gram matrix `selfᵗ * self`.
    pub fn gram(&self) -> Matrix {
        let n = self.cols;
        let mut g = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                let mut sum = 0.0;
                for k in 0..self.rows {
                    sum += self.data[k * n + i] * self.data[k * n + j];
                }
                g.data[i * n + j] = sum;
                g.data[j * n + i] = sum;
            }
        }
        g
    }

    /// Regularised Gram matrix `selfᵗ * self + lambda * I`.
    pub fn gram_ridge(&self, lambda: f64) -> Matrix {
        let mut g = self.gram();
        for i in 0..self.cols {
            g.data[i * self.cols + i] += lambda;
        }
        g
    }

    /// Matrix inverse via LU decomposition.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` - matrix is not square
    /// * `SingularMatrix` - matrix is singular to working precision
    pub fn inverse(&self) -> Result<Matrix, NumericError> {
        LuDecomposition::generate(self)?.inverse()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let cells: Vec<String> = self.row(i).iter().map(|v| format!("{:12.6}", v)).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Matrix {
        Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_from_rows_ragged_rejected() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_from_vec_length_checked() {
        assert!(Matrix::from_vec(2, 2, vec![1.0; 3]).is_err());
        let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m[(1, 0)], 3.0);
    }

    #[test]
    fn test_identity() {
        let i = Matrix::identity(3);
        assert_eq!(i[(0, 0)], 1.0);
        assert_eq!(i[(0, 1)], 0.0);
        assert!(i.is_square());
    }

    #[test]
    fn test_transpose() {
        let t = sample().transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn test_add_and_scale() {
        let a = sample();
        let sum = a.add(&a.scale(2.0)).unwrap();
        assert_eq!(sum[(1, 2)], 18.0);

        let err = a.add(&a.transpose()).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_mul() {
        let a = sample();
        let p = a.mul(&a.transpose()).unwrap();
        assert_eq!(p.shape(), "2x2");
        assert_eq!(p[(0, 0)], 14.0);
        assert_eq!(p[(0, 1)], 32.0);
        assert_eq!(p[(1, 1)], 77.0);

        assert!(a.mul(&a).is_err());
    }

    #[test]
    fn test_mul_vec_and_transpose_mul_vec() {
        let a = sample();
        assert_eq!(a.mul_vec(&[1.0, 0.0, -1.0]).unwrap(), vec![-2.0, -2.0]);
        assert_eq!(
            a.transpose_mul_vec(&[1.0, 1.0]).unwrap(),
            vec![5.0, 7.0, 9.0]
        );
        assert!(a.mul_vec(&[1.0, 2.0]).is_err());
        assert!(a.transpose_mul_vec(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_gram_matches_explicit_product() {
        let a = sample();
        let explicit = a.transpose().mul(&a).unwrap();
        assert_eq!(a.gram(), explicit);

        let ridge = a.gram_ridge(0.5);
        assert_relative_eq!(ridge[(0, 0)], explicit[(0, 0)] + 0.5);
        assert_relative_eq!(ridge[(0, 1)], explicit[(0, 1)]);
    }

    #[test]
    fn test_inverse() {
        let a = Matrix::from_rows(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
        let inv = a.inverse().unwrap();
        let product = a.mul(&inv).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_inverse_non_square() {
        assert!(sample().inverse().unwrap_err().is_dimension_mismatch());
    }

    #[test]
    fn test_get_out_of_range() {
        assert_eq!(sample().get(5, 0), None);
        assert_eq!(sample().get(1, 1), Some(5.0));
    }

    #[test]
    fn test_column_and_to_rows() {
        let a = sample();
        assert_eq!(a.column(1), vec![2.0, 5.0]);
        assert_eq!(a.to_rows()[1], vec![4.0, 5.0, 6.0]);
    }
}
