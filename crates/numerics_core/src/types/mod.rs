//! Outcome and error types.
//!
//! This module provides:
//! - `error`: The `NumericError` taxonomy returned by every fallible operation
//! - `outcome`: The `Outcome` success/failure record and its `ErrorResult` branch
//!
//! # Re-exports
//!
//! [`NumericError`], [`Outcome`] and [`ErrorResult`] are re-exported at this
//! module level.

pub mod error;
pub mod outcome;

pub use error::NumericError;
pub use outcome::{ErrorResult, Outcome};
