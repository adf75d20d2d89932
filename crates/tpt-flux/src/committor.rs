//! Committor probabilities via the generator boundary value problem.

use nalgebra::DMatrix;
use tpt_core::errors::{ErrorInfo, TptError};
use tpt_core::{StateSet, Tolerance};
use tpt_markov::{is_reversible, solve_dense, time_reversal, StationaryDistribution, TransitionMatrix};

pub(crate) fn validate_sets(
    transition: &TransitionMatrix,
    source: &StateSet,
    sink: &StateSet,
) -> Result<(), TptError> {
    let n = transition.n_states();
    for (label, set) in [("source", source), ("sink", sink)] {
        if let Some(max) = set.max_index() {
            if max >= n {
                return Err(TptError::InvalidStateSet(
                    ErrorInfo::new("index-out-of-range", "state set index exceeds chain size")
                        .with_context("set", label.to_string())
                        .with_context("index", max.to_string())
                        .with_context("n_states", n.to_string()),
                ));
            }
        }
    }
    StateSet::ensure_disjoint(source, sink)
}

/// Solves the interior rows of `(P - I) q = 0` with boundary values
/// `on_source` on the source set and `on_sink` on the sink set.
fn solve_bvp(
    transition: &TransitionMatrix,
    source: &StateSet,
    sink: &StateSet,
    on_source: f64,
    on_sink: f64,
    tolerance: &Tolerance,
) -> Result<Vec<f64>, TptError> {
    let n = transition.n_states();
    let interior: Vec<usize> = (0..n)
        .filter(|&i| !source.contains(i) && !sink.contains(i))
        .collect();

    let mut q = vec![0.0; n];
    for &i in source.indices() {
        q[i] = on_source;
    }
    for &i in sink.indices() {
        q[i] = on_sink;
    }
    if interior.is_empty() {
        return Ok(q);
    }

    // Reduced system (P_CC - I) q_C = -(on_source * P_CA 1 + on_sink * P_CB 1).
    let m = interior.len();
    let mut reduced = DMatrix::<f64>::zeros(m, m);
    let mut rhs = vec![0.0; m];
    for (ri, &i) in interior.iter().enumerate() {
        for (rj, &j) in interior.iter().enumerate() {
            let mut entry = transition.prob(i, j);
            if ri == rj {
                entry -= 1.0;
            }
            reduced[(ri, rj)] = entry;
        }
        let to_source: f64 = source.indices().iter().map(|&j| transition.prob(i, j)).sum();
        let to_sink: f64 = sink.indices().iter().map(|&j| transition.prob(i, j)).sum();
        rhs[ri] = -(on_source * to_source + on_sink * to_sink);
    }

    let solution = solve_dense(&reduced, &rhs, tolerance)?;
    for (ri, &i) in interior.iter().enumerate() {
        // Committors are probabilities; clamp round-off back into [0, 1].
        q[i] = solution[ri].clamp(0.0, 1.0);
    }
    Ok(q)
}

/// Computes the forward committor `q+`: the probability of reaching the sink
/// before the source, starting from each state.
///
/// Boundary values are `q+ = 0` on the source set and `q+ = 1` on the sink
/// set; interior states solve `(P_CC - I) q_C = -P_CB 1`. Fails with
/// [`TptError::SingularSystem`] when the interior region is disconnected
/// from the boundary, e.g. an absorbing interior state.
pub fn forward_committor(
    transition: &TransitionMatrix,
    source: &StateSet,
    sink: &StateSet,
    tolerance: &Tolerance,
) -> Result<Vec<f64>, TptError> {
    validate_sets(transition, source, sink)?;
    solve_bvp(transition, source, sink, 0.0, 1.0, tolerance)
}

/// Backward committor given an already-computed forward committor.
///
/// Inputs are assumed validated by the caller. Avoids re-running the
/// forward solve when detailed balance holds, where `q- = 1 - q+` is an
/// identity.
pub(crate) fn backward_from_forward(
    transition: &TransitionMatrix,
    stationary: &StationaryDistribution,
    source: &StateSet,
    sink: &StateSet,
    forward: &[f64],
    tolerance: &Tolerance,
) -> Result<Vec<f64>, TptError> {
    if is_reversible(transition, stationary, tolerance) {
        return Ok(forward.iter().map(|q| 1.0 - q).collect());
    }
    let reversed = time_reversal(transition, stationary);
    solve_bvp(&reversed, source, sink, 1.0, 0.0, tolerance)
}

/// Computes the backward committor `q-`: the probability that, looking
/// backwards in time, the chain came from the source rather than the sink.
///
/// When detailed balance holds within tolerance the identity `q- = 1 - q+`
/// is used; otherwise the adjoint boundary value problem is solved on the
/// time-reversed chain with `q- = 1` on the source and `q- = 0` on the sink.
pub fn backward_committor(
    transition: &TransitionMatrix,
    stationary: &StationaryDistribution,
    source: &StateSet,
    sink: &StateSet,
    tolerance: &Tolerance,
) -> Result<Vec<f64>, TptError> {
    validate_sets(transition, source, sink)?;
    ensure_matching_dimension(transition, stationary)?;
    if is_reversible(transition, stationary, tolerance) {
        let q_plus = solve_bvp(transition, source, sink, 0.0, 1.0, tolerance)?;
        return Ok(q_plus.into_iter().map(|q| 1.0 - q).collect());
    }
    let reversed = time_reversal(transition, stationary);
    solve_bvp(&reversed, source, sink, 1.0, 0.0, tolerance)
}

pub(crate) fn ensure_matching_dimension(
    transition: &TransitionMatrix,
    stationary: &StationaryDistribution,
) -> Result<(), TptError> {
    if stationary.n_states() != transition.n_states() {
        return Err(TptError::Input(
            ErrorInfo::new("dimension-mismatch", "stationary distribution length must match state count")
                .with_context("n_states", transition.n_states().to_string())
                .with_context("len", stationary.n_states().to_string()),
        ));
    }
    Ok(())
}
