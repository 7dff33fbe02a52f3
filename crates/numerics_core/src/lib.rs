//! # numerics_core: Numerical Foundation Layer
//!
//! ## Layer 1 (Foundation) Role
//!
//! numerics_core is the bottom layer of the workspace, providing:
//! - Outcome and error types (`types::outcome`, `types::error`)
//! - Entry validation helpers (`validation`)
//! - Cooperative cancellation for long-running loops (`cancel`)
//! - Dense matrices and LU decomposition (`math::linalg`)
//! - Scalar and vector root finders (`math::solvers`)
//! - Normal distribution functions (`math::distributions`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other numerics_* crates:
//! - num-traits: generic floating-point solvers
//! - thiserror: error derivation
//! - tracing: iteration diagnostics
//! - serde: serialisation of results and errors (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use numerics_core::math::linalg::{LuDecomposition, Matrix};
//! use numerics_core::math::solvers::{VectorNewtonConfig, VectorNewtonSolver};
//!
//! // Solve a 2x2 linear system
//! let a = Matrix::from_rows(&[vec![4.0, 3.0], vec![6.0, 3.0]]).unwrap();
//! let lu = LuDecomposition::generate(&a).unwrap();
//! let x = lu.linear_solve(&[10.0, 12.0]).unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 2.0).abs() < 1e-12);
//!
//! // Solve a nonlinear system with an analytic Jacobian
//! let solver = VectorNewtonSolver::new(VectorNewtonConfig::default());
//! let f = |x: &[f64]| vec![(x[0] - 2.0) * (x[0] - 4.0), (x[1] - 3.0) * (x[1] - 5.0)];
//! let j = |x: &[f64]| {
//!     Matrix::from_rows(&[
//!         vec![2.0 * x[0] - 6.0, 0.0],
//!         vec![0.0, 2.0 * x[1] - 8.0],
//!     ])
//!     .unwrap()
//! };
//! let root = solver.solve(f, j, &[1.0, 2.0]).unwrap();
//! assert!((root.x[0] - 2.0).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for outcomes, errors and matrices

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cancel;
pub mod math;
pub mod types;
pub mod validation;

pub use cancel::CancellationToken;
pub use types::{ErrorResult, NumericError, Outcome};
