//! Dense linear solver for the committor boundary value problem.

use nalgebra::{DMatrix, DVector};
use tpt_core::errors::{ErrorInfo, TptError};
use tpt_core::Tolerance;

/// Solves `A x = b` by LU factorization with partial pivoting.
///
/// The committor systems the engine produces are small (the complement of
/// the source and sink sets), so a dense factorization is the right tool;
/// sparse or iterative solvers would only pay off at state counts well
/// beyond the target use cases.
///
/// Singularity is decided against `tolerance.pivot` on the diagonal of `U`,
/// not exact zero. Fails with [`TptError::SingularSystem`] when a pivot
/// falls below the threshold, which for committor systems means the
/// complement region is not properly connected to the boundary.
pub fn solve_dense(a: &DMatrix<f64>, b: &[f64], tolerance: &Tolerance) -> Result<Vec<f64>, TptError> {
    if a.nrows() != a.ncols() {
        return Err(TptError::Input(
            ErrorInfo::new("not-square", "coefficient matrix must be square")
                .with_context("nrows", a.nrows().to_string())
                .with_context("ncols", a.ncols().to_string()),
        ));
    }
    let n = a.nrows();
    if b.len() != n {
        return Err(TptError::Input(
            ErrorInfo::new("dimension-mismatch", "right-hand side length must match matrix dimension")
                .with_context("dim", n.to_string())
                .with_context("rhs_len", b.len().to_string()),
        ));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let lu = a.clone().lu();
    let u = lu.u();
    let min_pivot = (0..n).map(|i| u[(i, i)].abs()).fold(f64::INFINITY, f64::min);
    if min_pivot <= tolerance.pivot {
        return Err(TptError::SingularSystem(
            ErrorInfo::new("zero-pivot", "linear system is singular to working precision")
                .with_context("pivot", min_pivot.to_string())
                .with_hint("check that every intermediate state can reach the boundary"),
        ));
    }

    let solution = lu.solve(&DVector::from_column_slice(b)).ok_or_else(|| {
        TptError::SingularSystem(ErrorInfo::new(
            "no-solution",
            "LU substitution failed despite acceptable pivots",
        ))
    })?;
    Ok(solution.iter().copied().collect())
}
