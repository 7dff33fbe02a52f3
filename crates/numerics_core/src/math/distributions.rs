//! Normal distribution functions.
//!
//! This module provides:
//! - `norm_pdf`: Standard normal probability density function
//! - `norm_cdf`: Standard normal cumulative distribution function
//! - `norm_inv_cdf`: Standard normal quantile function
//! - [`Normal`]: location/scale normal distribution built on the above
//!
//! The density and CDF are generic over `T: Float`.

use num_traits::Float;

use crate::types::NumericError;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz and Stegun formula 7.1.26.
///
/// Maximum absolute error 1.5e-7 for all x.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let c = |v: f64| T::from(v).unwrap_or_else(T::zero);
    let one = T::one();
    let abs_x = x.abs();

    let t = one / (one + c(0.327_591_1) * abs_x);
    let poly = c(0.254_829_592)
        + t * (c(-0.284_496_736)
            + t * (c(1.421_413_741) + t * (c(-1.453_152_027) + t * c(1.061_405_429))));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        c(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = (1/2) * erfc(-x / sqrt(2)); accurate to about 1e-7.
///
/// # Examples
/// ```
/// use numerics_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap_or_else(T::one);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use numerics_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Standard normal quantile function (inverse CDF).
///
/// Acklam's rational approximation, relative error below 1.15e-9.
///
/// # Errors
///
/// * `InvalidInput` - `p` outside the open interval `(0, 1)`
///
/// # Examples
/// ```
/// use numerics_core::math::distributions::norm_inv_cdf;
///
/// assert!(norm_inv_cdf(0.5).unwrap().abs() < 1e-9);
/// assert!((norm_inv_cdf(0.975).unwrap() - 1.959963985).abs() < 1e-8);
/// assert!(norm_inv_cdf(1.0).is_err());
/// ```
pub fn norm_inv_cdf(p: f64) -> Result<f64, NumericError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(NumericError::InvalidInput(format!(
            "probability must lie in (0, 1), got {}",
            p
        )));
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    let x = if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    };

    Ok(x)
}

/// Normal distribution `N(mean, std_dev²)`.
///
/// # Example
///
/// ```
/// use numerics_core::math::distributions::Normal;
///
/// let n = Normal::new(10.0, 2.0).unwrap();
/// assert!((n.cdf(10.0) - 0.5).abs() < 1e-7);
/// assert!((n.inverse_cdf(0.5).unwrap() - 10.0).abs() < 1e-9);
/// assert!(Normal::new(0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Create a normal distribution.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - non-finite mean, or `std_dev` not strictly positive
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, NumericError> {
        if !mean.is_finite() {
            return Err(NumericError::InvalidInput(format!(
                "mean must be finite, got {}",
                mean
            )));
        }
        if !(std_dev > 0.0 && std_dev.is_finite()) {
            return Err(NumericError::InvalidInput(format!(
                "std_dev must be positive and finite, got {}",
                std_dev
            )));
        }
        Ok(Self { mean, std_dev })
    }

    /// The standard normal `N(0, 1)`.
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    /// Location parameter.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Scale parameter.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Variance `std_dev²`.
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        norm_pdf((x - self.mean) / self.std_dev) / self.std_dev
    }

    /// Cumulative probability `P(X <= x)`.
    pub fn cdf(&self, x: f64) -> f64 {
        norm_cdf((x - self.mean) / self.std_dev)
    }

    /// Quantile at probability `p`.
    pub fn inverse_cdf(&self, p: f64) -> Result<f64, NumericError> {
        Ok(self.mean + self.std_dev * norm_inv_cdf(p)?)
    }
}

impl Default for Normal {
    fn default() -> Self {
        Self::standard()
    }
}
