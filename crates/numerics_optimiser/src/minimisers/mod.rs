//! Minimisation algorithms.
//!
//! ## Available Minimisers
//!
//! - [`GoldenSectionSearch`]: derivative-free search for a unimodal scalar
//!   function on a bracket
//! - [`Bfgs`]: quasi-Newton method for smooth vector functions, driven by a
//!   strong-Wolfe [`line_search`]
//!
//! Every successful result carries an [`ExitCondition`]. Golden section
//! reports its iteration cap as [`ExitCondition::IterationLimit`]; BFGS
//! reports it as `NumericError::IterationLimitExceeded`, because an
//! unconverged quasi-Newton iterate carries no bracketing guarantee.
//!
//! ## Examples
//!
//! ```
//! use numerics_optimiser::minimisers::{ExitCondition, GoldenSectionSearch};
//!
//! let result = GoldenSectionSearch::with_defaults()
//!     .minimise(|x| (x - 0.25).powi(2), -1.0, 1.0)
//!     .unwrap();
//! assert!((result.x - 0.25).abs() < 1e-8);
//! assert_eq!(result.exit_condition, ExitCondition::BoundTolerance);
//! ```

mod bfgs;
mod exit_condition;
mod golden_section;
pub mod line_search;

pub use bfgs::{Bfgs, BfgsConfig};
pub use exit_condition::{ExitCondition, ScalarMinResult, VectorMinResult};
pub use golden_section::{GoldenSectionConfig, GoldenSectionSearch};
