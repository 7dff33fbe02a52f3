//! # numerics_optimiser
//!
//! Minimisation and regularised regression for numerics-rust.
//!
//! ## Architecture Position
//!
//! Layer 2 of the workspace. Depends only on `numerics_core` (L1) for
//! matrices, LU decomposition, the shared [`NumericError`] taxonomy and
//! cancellation tokens.
//!
//! ## Modules
//!
//! - `minimisers`: Golden-section search (scalar) and BFGS (vector) with a
//!   strong-Wolfe line search
//! - `regression`: Ridge (closed form) and Lasso (coordinate descent)
//!   parameter estimation
//!
//! ## Example
//!
//! ```rust
//! use numerics_optimiser::minimisers::{Bfgs, ExitCondition};
//!
//! let f = |p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] - 3.0).powi(2);
//! let grad = |p: &[f64]| vec![2.0 * (p[0] - 2.0), 2.0 * (p[1] - 3.0)];
//!
//! let result = Bfgs::with_defaults().minimise(f, grad, &[0.0, 0.0]).unwrap();
//! assert!((result.x[0] - 2.0).abs() < 1e-8);
//! assert!((result.x[1] - 3.0).abs() < 1e-8);
//! assert_ne!(result.exit_condition, ExitCondition::IterationLimit);
//! ```
//!
//! [`NumericError`]: numerics_core::NumericError

#![deny(missing_docs)]

pub mod minimisers;
pub mod regression;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::minimisers::*;
    pub use crate::regression::*;
    pub use numerics_core::{CancellationToken, NumericError, Outcome};
}
