//! Dense linear algebra primitives.
//!
//! ## Contents
//!
//! - [`Matrix`]: row-major dense matrix with shape-checked arithmetic
//!   (transpose, add, scale, product, matrix-vector product, `XᵗX`,
//!   `XᵗX + λI`, inverse)
//! - [`LuDecomposition`]: partial-pivoting LU factorisation with linear solve
//! - [`vector`]: slice helpers (dot, norms, axpy)
//!
//! Every operation validates shapes before computing and reports
//! incompatible operands as `NumericError::DimensionMismatch`.

mod lu;
mod matrix;
pub mod vector;

pub use lu::{LuDecomposition, PIVOT_THRESHOLD};
pub use matrix::Matrix;
