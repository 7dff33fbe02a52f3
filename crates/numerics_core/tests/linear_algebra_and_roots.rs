//! Integration tests for numerics_core.
//!
//! Exercises the public API through absolute paths: linear algebra, LU
//! failure reporting, the vector Newton solver and outcome conversion.

use approx::assert_abs_diff_eq;
use numerics_core::math::linalg::{LuDecomposition, Matrix};
use numerics_core::math::solvers::{RootConvergence, VectorNewtonConfig, VectorNewtonSolver};
use numerics_core::{CancellationToken, NumericError, Outcome};

fn quadratic_pair(x: &[f64]) -> Vec<f64> {
    vec![(x[0] - 2.0) * (x[0] - 4.0), (x[1] - 3.0) * (x[1] - 5.0)]
}

fn quadratic_pair_jacobian(x: &[f64]) -> Matrix {
    Matrix::from_rows(&[vec![2.0 * x[0] - 6.0, 0.0], vec![0.0, 2.0 * x[1] - 8.0]]).unwrap()
}

// ============================================================================
// Vector Newton-Raphson
// ============================================================================

/// Quadratic pair from (1, 2) converges to (2, 3) within 1e-8.
#[test]
fn test_vector_newton_quadratic_pair() {
    let solver = VectorNewtonSolver::new(VectorNewtonConfig::default());
    let root = solver
        .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
        .unwrap();

    assert_abs_diff_eq!(root.x[0], 2.0, epsilon = 1e-8);
    assert_abs_diff_eq!(root.x[1], 3.0, epsilon = 1e-8);
    assert!(matches!(
        root.convergence,
        RootConvergence::FunctionTolerance | RootConvergence::StepTolerance
    ));
}

/// Coupled system: x² + y² = 5, x·y = 2 has a root at (2, 1).
#[test]
fn test_vector_newton_coupled_system() {
    let f = |v: &[f64]| vec![v[0] * v[0] + v[1] * v[1] - 5.0, v[0] * v[1] - 2.0];
    let j = |v: &[f64]| {
        Matrix::from_rows(&[vec![2.0 * v[0], 2.0 * v[1]], vec![v[1], v[0]]]).unwrap()
    };

    let root = VectorNewtonSolver::with_defaults()
        .solve(f, j, &[2.5, 0.5])
        .unwrap();
    assert_abs_diff_eq!(root.x[0], 2.0, epsilon = 1e-8);
    assert_abs_diff_eq!(root.x[1], 1.0, epsilon = 1e-8);
}

/// Repeated runs with identical inputs give identical outcomes.
#[test]
fn test_vector_newton_is_deterministic() {
    let solver = VectorNewtonSolver::with_defaults();
    let first: Outcome<_> = solver
        .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
        .into();
    let second: Outcome<_> = solver
        .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
        .into();
    assert_eq!(first, second);
}

/// Cancellation from a cloned token stops the solve.
#[test]
fn test_vector_newton_cancellation_via_clone() {
    let token = CancellationToken::new();
    let solver = VectorNewtonSolver::with_defaults().with_cancellation(token.clone());
    token.cancel();

    let outcome: Outcome<_> = solver
        .solve(quadratic_pair, quadratic_pair_jacobian, &[1.0, 2.0])
        .into();
    assert!(outcome.is_error());
    assert!(outcome.message().contains("Cancelled"));
}

// ============================================================================
// LU decomposition failure reporting
// ============================================================================

/// A singular matrix never yields a solve result.
#[test]
fn test_singular_matrix_outcome() {
    let a = Matrix::from_rows(&[
        vec![1.0, 2.0, 3.0],
        vec![0.0, 0.0, 0.0],
        vec![7.0, 8.0, 10.0],
    ])
    .unwrap();

    let outcome: Outcome<Vec<f64>> = LuDecomposition::generate(&a)
        .and_then(|lu| lu.linear_solve(&[1.0, 2.0, 3.0]))
        .into();

    assert!(outcome.is_error());
    assert!(outcome.data().is_none());
    assert!(outcome.clone().data_or_default().is_empty());
    match outcome {
        Outcome::Error(err) => assert!(matches!(err.kind, NumericError::SingularMatrix { .. })),
        Outcome::Success(_) => panic!("singular matrix produced a solution"),
    }
}

/// Factorising and solving twice gives the same bits.
#[test]
fn test_lu_solve_deterministic() {
    let a = Matrix::from_rows(&[
        vec![2.0, 1.0, -1.0],
        vec![-3.0, -1.0, 2.0],
        vec![-2.0, 1.0, 2.0],
    ])
    .unwrap();
    let b = [8.0, -11.0, -3.0];

    let first = LuDecomposition::generate(&a).unwrap().linear_solve(&b).unwrap();
    let second = LuDecomposition::generate(&a).unwrap().linear_solve(&b).unwrap();
    assert_eq!(first, second);
    assert_abs_diff_eq!(first[0], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first[1], 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(first[2], -1.0, epsilon = 1e-12);
}

/// Inverse composes with multiplication back to the identity.
#[test]
fn test_inverse_round_trip() {
    let a = Matrix::from_rows(&[
        vec![4.0, -2.0, 1.0],
        vec![-2.0, 4.0, -2.0],
        vec![1.0, -2.0, 4.0],
    ])
    .unwrap();

    let product = a.mul(&a.inverse().unwrap()).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(product[(i, j)], expected, epsilon = 1e-12);
        }
    }
}

/// Shape errors are detected before computation.
#[test]
fn test_dimension_mismatch_reporting() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);

    assert!(a.mul(&b).unwrap_err().is_dimension_mismatch());
    assert!(a.mul_vec(&[1.0, 2.0]).unwrap_err().is_dimension_mismatch());
    assert!(a.add(&b).is_ok());
    assert!(a.inverse().unwrap_err().is_dimension_mismatch());
}
