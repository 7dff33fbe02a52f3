//! Entry validation helpers.
//!
//! Algorithms call these before doing any work so that malformed input is
//! rejected with a typed [`NumericError`] rather than producing garbage.

use crate::types::NumericError;

/// Reject an empty slice.
///
/// # Examples
/// ```
/// use numerics_core::validation::ensure_non_empty;
///
/// assert!(ensure_non_empty("x0", &[1.0]).is_ok());
/// assert!(ensure_non_empty("x0", &[]).is_err());
/// ```
pub fn ensure_non_empty(name: &str, values: &[f64]) -> Result<(), NumericError> {
    if values.is_empty() {
        return Err(NumericError::InvalidInput(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Reject any NaN or infinite entry.
pub fn ensure_finite(name: &str, values: &[f64]) -> Result<(), NumericError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(NumericError::InvalidInput(format!(
            "{}[{}] is not finite ({})",
            name, index, values[index]
        ))),
        None => Ok(()),
    }
}

/// Reject a non-finite scalar.
pub fn ensure_finite_scalar(name: &str, value: f64) -> Result<(), NumericError> {
    if !value.is_finite() {
        return Err(NumericError::InvalidInput(format!(
            "{} is not finite ({})",
            name, value
        )));
    }
    Ok(())
}

/// Require `actual == expected` for a vector length.
pub fn ensure_length(
    operation: &str,
    expected: usize,
    actual: usize,
) -> Result<(), NumericError> {
    if expected != actual {
        return Err(NumericError::dimension_mismatch(
            operation,
            format!("length {}", expected),
            format!("length {}", actual),
        ));
    }
    Ok(())
}

/// Require a square `rows x cols` shape.
pub fn ensure_square(operation: &str, rows: usize, cols: usize) -> Result<(), NumericError> {
    if rows != cols {
        return Err(NumericError::dimension_mismatch(
            operation,
            "square matrix",
            format!("{}x{}", rows, cols),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite_reports_index() {
        let err = ensure_finite("x", &[1.0, f64::NAN, 2.0]).unwrap_err();
        match err {
            NumericError::InvalidInput(msg) => assert!(msg.contains("x[1]")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert!(ensure_finite("x", &[1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_ensure_finite_scalar() {
        assert!(ensure_finite_scalar("lower", 0.0).is_ok());
        assert!(ensure_finite_scalar("lower", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_length() {
        assert!(ensure_length("dot", 3, 3).is_ok());
        let err = ensure_length("dot", 3, 2).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_ensure_square() {
        assert!(ensure_square("lu", 2, 2).is_ok());
        let err = ensure_square("lu", 2, 3).unwrap_err();
        assert!(format!("{}", err).contains("2x3"));
    }
}
