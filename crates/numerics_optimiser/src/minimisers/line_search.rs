//! Strong-Wolfe line search.
//!
//! Finds a step length `α` along a descent direction `d` satisfying
//!
//! ```text
//! f(x + αd) <= f(x) + c1 α ∇f(x)ᵀd          (sufficient decrease)
//! |∇f(x + αd)ᵀd| <= c2 |∇f(x)ᵀd|            (curvature)
//! ```
//!
//! The search expands the trial step until the acceptable region is
//! bracketed, then zooms into the bracket using cubic interpolation with a
//! bisection fallback (Nocedal and Wright, algorithms 3.5 and 3.6).

use numerics_core::math::linalg::vector;
use numerics_core::NumericError;

/// Sufficient-decrease constant.
pub const C1: f64 = 1e-4;

/// Curvature constant.
pub const C2: f64 = 0.9;

const MAX_BRACKET_STEPS: usize = 30;
const MAX_ZOOM_STEPS: usize = 40;
const MIN_INTERVAL: f64 = 1e-14;

/// Accepted step from [`strong_wolfe`].
#[derive(Debug, Clone, PartialEq)]
pub struct WolfeStep {
    /// Step length `α`.
    pub alpha: f64,
    /// Objective value at `x + αd`.
    pub value: f64,
    /// Gradient at `x + αd`.
    pub gradient: Vec<f64>,
    /// Trial points evaluated.
    pub evaluations: usize,
}

/// Objective value and directional derivative at one trial step.
#[derive(Debug, Clone, Copy)]
struct Probe {
    alpha: f64,
    value: f64,
    slope: f64,
}

/// Search for a step along `direction` satisfying the strong Wolfe conditions.
///
/// # Arguments
///
/// * `f`, `grad` - Objective and its gradient
/// * `x` - Current point
/// * `direction` - Descent direction (`∇f(x)ᵀd < 0`)
/// * `value`, `gradient` - `f(x)` and `∇f(x)`, already evaluated
/// * `initial_step` - First trial `α`
/// * `iteration` - Outer minimiser iteration, used only for error reporting
///
/// # Errors
///
/// * `LineSearchFailed` - `direction` is not a descent direction, a NaN was
///   produced, or no acceptable step was found within the attempt budget
#[allow(clippy::too_many_arguments)]
pub fn strong_wolfe<F, G>(
    f: &F,
    grad: &G,
    x: &[f64],
    direction: &[f64],
    value: f64,
    gradient: &[f64],
    initial_step: f64,
    iteration: usize,
) -> Result<WolfeStep, NumericError>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    let slope0 = vector::dot(gradient, direction);
    let mut evaluations = 0;
    let failed = |attempts: usize| NumericError::LineSearchFailed {
        iteration,
        attempts,
    };

    if slope0.is_nan() || slope0 >= 0.0 {
        return Err(failed(0));
    }

    let origin = Probe {
        alpha: 0.0,
        value,
        slope: slope0,
    };
    let evaluate = |alpha: f64, evaluations: &mut usize| {
        *evaluations += 1;
        let trial = vector::axpy(x, alpha, direction);
        let v = f(&trial);
        let g = grad(&trial);
        let slope = vector::dot(&g, direction);
        (Probe { alpha, value: v, slope }, g)
    };

    let mut previous = origin;
    let mut alpha = initial_step;

    for step in 0..MAX_BRACKET_STEPS {
        let (probe, g) = evaluate(alpha, &mut evaluations);
        if probe.value.is_nan() || (probe.value.is_finite() && probe.slope.is_nan()) {
            return Err(failed(evaluations));
        }

        if !probe.value.is_finite()
            || probe.value > value + C1 * alpha * slope0
            || (step > 0 && probe.value >= previous.value)
        {
            return zoom(&evaluate, origin, previous, probe, &mut evaluations)
                .ok_or_else(|| failed(evaluations));
        }

        if probe.slope.abs() <= C2 * slope0.abs() {
            return Ok(WolfeStep {
                alpha,
                value: probe.value,
                gradient: g,
                evaluations,
            });
        }

        if probe.slope >= 0.0 {
            return zoom(&evaluate, origin, probe, previous, &mut evaluations)
                .ok_or_else(|| failed(evaluations));
        }

        previous = probe;
        alpha *= 2.0;
    }

    Err(failed(evaluations))
}

/// Refine the bracket `[lo, hi]` until a strong-Wolfe step is found.
///
/// `lo` always holds the lowest sufficient-decrease value seen so far.
fn zoom<E>(
    evaluate: &E,
    origin: Probe,
    mut lo: Probe,
    mut hi: Probe,
    evaluations: &mut usize,
) -> Option<WolfeStep>
where
    E: Fn(f64, &mut usize) -> (Probe, Vec<f64>),
{
    for _ in 0..MAX_ZOOM_STEPS {
        let alpha = interpolate(&lo, &hi);
        let (probe, g) = evaluate(alpha, evaluations);

        // +∞ outside the objective's domain shrinks the bracket below
        if probe.value.is_nan() || (probe.value.is_finite() && g.iter().any(|v| v.is_nan())) {
            return None;
        }

        if !probe.value.is_finite()
            || probe.value > origin.value + C1 * alpha * origin.slope
            || probe.value >= lo.value
        {
            hi = probe;
            continue;
        }

        if probe.slope.abs() <= C2 * origin.slope.abs() {
            return Some(WolfeStep {
                alpha,
                value: probe.value,
                gradient: g,
                evaluations: *evaluations,
            });
        }

        if probe.slope * (hi.alpha - lo.alpha) >= 0.0 {
            hi = lo;
        }
        lo = probe;

        if (hi.alpha - lo.alpha).abs() < MIN_INTERVAL * lo.alpha.abs().max(1.0) {
            break;
        }
    }
    tracing::debug!(lo = lo.alpha, hi = hi.alpha, "zoom exhausted");
    None
}

/// Cubic interpolant minimiser on `[lo, hi]`, falling back to bisection
/// when the cubic is degenerate or lands too close to an endpoint.
fn interpolate(lo: &Probe, hi: &Probe) -> f64 {
    let (left, right) = if lo.alpha < hi.alpha { (lo, hi) } else { (hi, lo) };
    let midpoint = 0.5 * (left.alpha + right.alpha);
    let width = right.alpha - left.alpha;

    if width <= 0.0 || !left.value.is_finite() || !right.value.is_finite() {
        return midpoint;
    }

    let d1 = left.slope + right.slope - 3.0 * (right.value - left.value) / width;
    let d2_sq = d1 * d1 - left.slope * right.slope;
    if d2_sq < 0.0 {
        return midpoint;
    }
    let d2 = d2_sq.sqrt();
    let trial =
        right.alpha - width * (right.slope + d2 - d1) / (right.slope - left.slope + 2.0 * d2);

    // keep the trial at least 1% of the bracket away from either end
    let margin = 0.01 * width;
    if !trial.is_finite() || trial < left.alpha + margin || trial > right.alpha - margin {
        midpoint
    } else {
        trial
    }
}
