//! Detailed balance and time reversal.

use nalgebra::DMatrix;
use tpt_core::Tolerance;

use crate::stationary::StationaryDistribution;
use crate::transition::TransitionMatrix;

/// Tests detailed balance `pi_i P_ij == pi_j P_ji` within tolerance.
pub fn is_reversible(
    transition: &TransitionMatrix,
    stationary: &StationaryDistribution,
    tolerance: &Tolerance,
) -> bool {
    let n = transition.n_states();
    if stationary.n_states() != n {
        return false;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let forward = stationary.weight(i) * transition.prob(i, j);
            let backward = stationary.weight(j) * transition.prob(j, i);
            if (forward - backward).abs() > tolerance.detailed_balance {
                return false;
            }
        }
    }
    true
}

/// Builds the time-reversed chain `P*_ij = pi_j P_ji / pi_i`.
///
/// The reversed chain is row-stochastic by construction whenever `pi` is
/// stationary for `P`, so no re-validation is performed.
pub fn time_reversal(
    transition: &TransitionMatrix,
    stationary: &StationaryDistribution,
) -> TransitionMatrix {
    let n = transition.n_states();
    let mut reversed = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        let pi_i = stationary.weight(i);
        for j in 0..n {
            reversed[(i, j)] = stationary.weight(j) * transition.prob(j, i) / pi_i;
        }
    }
    TransitionMatrix::from_validated(reversed)
}
