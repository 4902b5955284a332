//! Dense symmetric positive-definite solves for the solver's normal
//! equations.

use nalgebra::{DMatrix, DVector};

/// Solve `A x = b` for symmetric positive-definite `A` via an in-place
/// Cholesky factorization.
///
/// Returns `None` when the factorization hits a non-positive or non-finite
/// pivot, which is how a singular or indefinite system shows up here.
///
/// # Panics
///
/// Panics if `a` is not square or `b` does not match its order.
pub fn solve_spd(mut a: DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "matrix must be square");
    assert_eq!(b.len(), n, "right-hand side must match the matrix order");

    // Factor A = L L^T, writing L over the lower triangle of `a`.
    for j in 0..n {
        let mut pivot = a[(j, j)];
        for k in 0..j {
            pivot -= a[(j, k)] * a[(j, k)];
        }
        if pivot <= 0.0 || !pivot.is_finite() {
            return None;
        }
        a[(j, j)] = pivot.sqrt();
        for i in j + 1..n {
            let mut sum = a[(i, j)];
            for k in 0..j {
                sum -= a[(i, k)] * a[(j, k)];
            }
            a[(i, j)] = sum / a[(j, j)];
        }
    }

    // Forward-substitute L y = b.
    let mut y = DVector::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= a[(i, k)] * y[k];
        }
        y[i] = sum / a[(i, i)];
    }

    // Back-substitute L^T x = y.
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for k in i + 1..n {
            sum -= a[(k, i)] * x[k];
        }
        x[i] = sum / a[(i, i)];
    }

    Some(x)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
