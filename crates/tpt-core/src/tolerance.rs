//! Numerical tolerances applied during validation and solving.

use serde::{Deserialize, Serialize};

fn default_row_sum() -> f64 {
    1e-9
}

fn default_distribution() -> f64 {
    1e-9
}

fn default_pivot() -> f64 {
    1e-12
}

fn default_detailed_balance() -> f64 {
    1e-10
}

fn default_rate_floor() -> f64 {
    1e-15
}

/// Epsilon thresholds used instead of exact zero comparisons.
///
/// Near-singular committor systems and near-zero rate denominators are
/// decided against these thresholds, never against exact zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Maximum deviation of a transition matrix row sum from 1.
    #[serde(default = "default_row_sum")]
    pub row_sum: f64,
    /// Maximum deviation of the stationary distribution sum from 1, and of
    /// the invariance residual `pi P - pi`.
    #[serde(default = "default_distribution")]
    pub distribution: f64,
    /// Minimum pivot magnitude accepted by the LU solver.
    #[serde(default = "default_pivot")]
    pub pivot: f64,
    /// Maximum detailed-balance residual for the reversible fast path.
    #[serde(default = "default_detailed_balance")]
    pub detailed_balance: f64,
    /// Minimum rate denominator before the flux is declared degenerate.
    #[serde(default = "default_rate_floor")]
    pub rate_floor: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            row_sum: default_row_sum(),
            distribution: default_distribution(),
            pivot: default_pivot(),
            detailed_balance: default_detailed_balance(),
            rate_floor: default_rate_floor(),
        }
    }
}
