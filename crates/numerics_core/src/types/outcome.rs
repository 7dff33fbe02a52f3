//! Success/failure outcome record.
//!
//! [`Outcome`] is the caller-facing record of a single operation: either the
//! produced data, or an [`ErrorResult`] carrying a message and ancillary
//! diagnostic lines. Algorithms themselves return `Result<T, NumericError>`
//! so they compose with `?`; an `Outcome` is built from that result once the
//! operation completes.
//!
//! # Examples
//! ```
//! use numerics_core::types::{NumericError, Outcome};
//!
//! let ok: Outcome<f64> = Outcome::success(1.5);
//! assert_eq!(ok.data(), Some(&1.5));
//!
//! let failed: Outcome<f64> = Err(NumericError::IterationLimitExceeded { iterations: 10 }).into();
//! assert!(failed.is_error());
//! assert_eq!(failed.data_or_default(), 0.0);
//! ```

use std::fmt;

use super::NumericError;

/// Failure branch of an [`Outcome`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorResult {
    /// Classified error kind.
    pub kind: NumericError,
    /// Human-readable summary.
    pub message: String,
    /// Additional diagnostic lines.
    pub ancillary: Vec<String>,
}

impl ErrorResult {
    /// Create an error result whose message and ancillary lines come from `kind`.
    pub fn new(kind: NumericError) -> Self {
        Self {
            message: kind.to_string(),
            ancillary: kind.ancillary(),
            kind,
        }
    }

    /// Replace the message while keeping the error kind.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Append an ancillary diagnostic line.
    pub fn with_ancillary(mut self, line: impl Into<String>) -> Self {
        self.ancillary.push(line.into());
        self
    }
}

impl From<NumericError> for ErrorResult {
    fn from(kind: NumericError) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for line in &self.ancillary {
            write!(f, "\n  {}", line)?;
        }
        Ok(())
    }
}

/// Outcome of an operation: the produced data or a described failure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<T> {
    /// Operation succeeded with the given data.
    Success(T),
    /// Operation failed.
    Error(ErrorResult),
}

impl<T> Outcome<T> {
    /// Wrap a successful value.
    pub fn success(data: T) -> Self {
        Outcome::Success(data)
    }

    /// Build a failure from an error kind.
    pub fn error(kind: NumericError) -> Self {
        Outcome::Error(ErrorResult::new(kind))
    }

    /// Build a failure with an explicit message and ancillary lines.
    pub fn error_with(
        kind: NumericError,
        message: impl Into<String>,
        ancillary: Vec<String>,
    ) -> Self {
        Outcome::Error(ErrorResult {
            kind,
            message: message.into(),
            ancillary,
        })
    }

    /// Returns `true` for the success branch.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` for the failure branch.
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Data of a successful outcome.
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Error(_) => None,
        }
    }

    /// Failure message, empty on success.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(_) => "",
            Outcome::Error(err) => &err.message,
        }
    }

    /// Ancillary diagnostic lines, empty on success.
    pub fn ancillary(&self) -> &[String] {
        match self {
            Outcome::Success(_) => &[],
            Outcome::Error(err) => &err.ancillary,
        }
    }

    /// Map the success data.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(data) => Outcome::Success(f(data)),
            Outcome::Error(err) => Outcome::Error(err),
        }
    }

    /// Convert back into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<T, ErrorResult> {
        match self {
            Outcome::Success(data) => Ok(data),
            Outcome::Error(err) => Err(err),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// Data of a successful outcome, or `T::default()` on failure.
    pub fn data_or_default(self) -> T {
        match self {
            Outcome::Success(data) => data,
            Outcome::Error(_) => T::default(),
        }
    }
}

impl<T> From<Result<T, NumericError>> for Outcome<T> {
    fn from(result: Result<T, NumericError>) -> Self {
        match result {
            Ok(data) => Outcome::Success(data),
            Err(kind) => Outcome::error(kind),
        }
    }
}
