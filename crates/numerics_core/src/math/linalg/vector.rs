//! Dense vector helpers on `&[f64]`.
//!
//! Lengths are the caller's responsibility; mismatched slices are truncated
//! by `zip`, so the algorithms validate shapes before calling into here.

/// Inner product.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Sum of absolute values (L1 norm).
#[inline]
pub fn sum_abs(a: &[f64]) -> f64 {
    a.iter().map(|x| x.abs()).sum()
}

/// Maximum absolute value (L∞ norm).
#[inline]
pub fn max_abs(a: &[f64]) -> f64 {
    a.iter().fold(0.0, |m, x| m.max(x.abs()))
}

/// `x + alpha * d`.
pub fn axpy(x: &[f64], alpha: f64, d: &[f64]) -> Vec<f64> {
    debug_assert_eq!(x.len(), d.len());
    x.iter().zip(d).map(|(xi, di)| xi + alpha * di).collect()
}

/// `a - b`.
pub fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// `factor * a`.
pub fn scale(a: &[f64], factor: f64) -> Vec<f64> {
    a.iter().map(|x| x * factor).collect()
}
