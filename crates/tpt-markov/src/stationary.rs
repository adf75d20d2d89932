//! Stationary distributions supplied by external estimators.

use serde::{Deserialize, Serialize};
use tpt_core::errors::{ErrorInfo, TptError};
use tpt_core::Tolerance;

use crate::transition::TransitionMatrix;

/// A validated stationary distribution: strictly positive weights summing
/// to 1.
///
/// The engine assumes irreducibility of the chain on the relevant recurrent
/// class; otherwise the stationary distribution is not unique and the caller
/// must not supply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryDistribution {
    weights: Vec<f64>,
}

impl StationaryDistribution {
    /// Validates positivity and normalization of the supplied weights.
    pub fn new(weights: Vec<f64>, tolerance: &Tolerance) -> Result<Self, TptError> {
        if weights.is_empty() {
            return Err(TptError::Input(ErrorInfo::new(
                "empty-distribution",
                "stationary distribution must have at least one entry",
            )));
        }
        for (idx, &w) in weights.iter().enumerate() {
            if w <= 0.0 || !w.is_finite() {
                return Err(TptError::Input(
                    ErrorInfo::new("non-positive-weight", "stationary weights must be finite and strictly positive")
                        .with_context("state", idx.to_string())
                        .with_context("value", w.to_string()),
                ));
            }
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > tolerance.distribution {
            return Err(TptError::Input(
                ErrorInfo::new("not-normalized", "stationary weights must sum to 1")
                    .with_context("sum", sum.to_string()),
            ));
        }
        Ok(Self { weights })
    }

    /// Returns the number of states.
    pub fn n_states(&self) -> usize {
        self.weights.len()
    }

    /// Returns the stationary weight of the given state.
    #[inline]
    pub fn weight(&self, state: usize) -> f64 {
        self.weights[state]
    }

    /// Returns all weights as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Checks the invariance residual `pi P - pi` against tolerance.
    ///
    /// Opt-in rather than enforced at construction: callers may hold a
    /// distribution from an estimator whose convergence tolerance differs
    /// from ours.
    pub fn verify_invariance(
        &self,
        transition: &TransitionMatrix,
        tolerance: &Tolerance,
    ) -> Result<(), TptError> {
        let n = self.weights.len();
        if transition.n_states() != n {
            return Err(TptError::Input(
                ErrorInfo::new("dimension-mismatch", "stationary distribution length must match state count")
                    .with_context("n_states", transition.n_states().to_string())
                    .with_context("len", n.to_string()),
            ));
        }
        for j in 0..n {
            let propagated: f64 = (0..n).map(|i| self.weights[i] * transition.prob(i, j)).sum();
            let residual = (propagated - self.weights[j]).abs();
            if residual > tolerance.distribution {
                return Err(TptError::Input(
                    ErrorInfo::new("not-invariant", "distribution is not stationary under the transition matrix")
                        .with_context("state", j.to_string())
                        .with_context("residual", residual.to_string()),
                ));
            }
        }
        Ok(())
    }
}
