//! Row-stochastic transition matrices.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tpt_core::errors::{ErrorInfo, TptError};
use tpt_core::Tolerance;

/// A validated row-stochastic transition matrix.
///
/// Every entry is non-negative and every row sums to 1 within the configured
/// tolerance. The matrix is immutable after construction; the engine is a
/// pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    matrix: DMatrix<f64>,
}

impl TransitionMatrix {
    /// Validates and wraps a dense matrix as a transition matrix.
    pub fn new(matrix: DMatrix<f64>, tolerance: &Tolerance) -> Result<Self, TptError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(TptError::Input(
                ErrorInfo::new("not-square", "transition matrix must be square")
                    .with_context("nrows", matrix.nrows().to_string())
                    .with_context("ncols", matrix.ncols().to_string()),
            ));
        }
        let n = matrix.nrows();
        if n == 0 {
            return Err(TptError::Input(ErrorInfo::new(
                "empty-matrix",
                "transition matrix must have at least one state",
            )));
        }
        for row in 0..n {
            for col in 0..n {
                let p = matrix[(row, col)];
                if p < 0.0 || !p.is_finite() {
                    return Err(TptError::Input(
                        ErrorInfo::new("negative-probability", "transition probabilities must be finite and non-negative")
                            .with_context("row", row.to_string())
                            .with_context("col", col.to_string())
                            .with_context("value", p.to_string()),
                    ));
                }
            }
            let sum: f64 = matrix.row(row).iter().sum();
            if (sum - 1.0).abs() > tolerance.row_sum {
                return Err(TptError::Input(
                    ErrorInfo::new("row-not-stochastic", "transition matrix rows must sum to 1")
                        .with_context("row", row.to_string())
                        .with_context("sum", sum.to_string())
                        .with_hint("normalize the row or loosen tolerance.row_sum"),
                ));
            }
        }
        Ok(Self { matrix })
    }

    /// Convenience constructor from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>, tolerance: &Tolerance) -> Result<Self, TptError> {
        let n = rows.len();
        let mut flat = Vec::with_capacity(n * n);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TptError::Input(
                    ErrorInfo::new("ragged-rows", "matrix rows must all have length n")
                        .with_context("row", idx.to_string())
                        .with_context("expected", n.to_string())
                        .with_context("actual", row.len().to_string()),
                ));
            }
            flat.extend(row);
        }
        Self::new(DMatrix::from_row_slice(n, n, &flat), tolerance)
    }

    /// Wraps a matrix that is stochastic by construction, skipping checks.
    pub(crate) fn from_validated(matrix: DMatrix<f64>) -> Self {
        Self { matrix }
    }

    /// Returns the number of states `n`.
    pub fn n_states(&self) -> usize {
        self.matrix.nrows()
    }

    /// Returns the transition probability from `i` to `j`.
    #[inline]
    pub fn prob(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// Returns the underlying matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}
