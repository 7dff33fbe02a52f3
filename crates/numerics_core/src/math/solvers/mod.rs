//! Root-finding solvers.
//!
//! ## Available Solvers
//!
//! ### Scalar
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//! - [`BisectionSolver`]: Robust bracketing method without derivative requirement
//!
//! ### Vector
//!
//! - [`VectorNewtonSolver`]: Newton-Raphson on `Rⁿ -> Rⁿ` with an analytic
//!   Jacobian, solving each step through LU decomposition
//!
//! ## Configuration
//!
//! Scalar solvers use [`SolverConfig`]:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! The vector solver uses [`VectorNewtonConfig`]:
//! - `max_iterations`: default 100
//! - `step_tolerance`: default 1e-8
//! - `function_tolerance`: default 1e-8
//!
//! Every solver accepts an optional [`crate::CancellationToken`] through
//! `with_cancellation`, checked once per iteration.
//!
//! ## Examples
//!
//! ```
//! use numerics_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let bisection = BisectionSolver::new(SolverConfig::default());
//!
//! let a = newton.find_root(f, f_prime, 1.0).unwrap();
//! let b = bisection.find_root(f, 0.0, 2.0).unwrap();
//! assert!((a - b).abs() < 1e-9);
//! ```

mod bisection;
mod config;
mod newton_raphson;
mod vector_newton;

pub use bisection::BisectionSolver;
pub use config::{SolverConfig, VectorNewtonConfig};
pub use newton_raphson::NewtonRaphsonSolver;
pub use vector_newton::{RootConvergence, VectorNewtonSolver, VectorRoot};
