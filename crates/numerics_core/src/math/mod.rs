//! Mathematical building blocks.
//!
//! - `linalg`: Dense matrices, vector helpers and LU decomposition
//! - `solvers`: Scalar (Newton, bisection) and vector (Newton) root finders
//! - `distributions`: Normal distribution density, CDF and quantile

pub mod distributions;
pub mod linalg;
pub mod solvers;
