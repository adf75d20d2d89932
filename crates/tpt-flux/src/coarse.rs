//! Exact coarse-graining of a flux network onto a hard partition.

use nalgebra::DMatrix;
use tpt_core::errors::{ErrorInfo, TptError};
use tpt_core::{StateSet, Tolerance};

use crate::flux::ReactiveFlux;

/// Lumps the state space into the given disjoint groups and recomputes
/// consistent flux quantities on the reduced network.
///
/// Groups straddling the source/sink boundary are split against `A`, `B`
/// and the intermediate region, so membership in `A`/`B` always determines
/// the lumped source and sink sets. Lumped committors are
/// stationary-weighted averages within each group; lumped gross flux is the
/// sum of member-to-member fluxes with a zero diagonal. Because the
/// partition is hard (no fractional membership), total flux and rate on the
/// lumped network equal the fine-grained values exactly; this is an
/// identity, not an approximation.
///
/// Returns the ordered list of effective groups (in the fine-grained index
/// space) together with the reduced result; group `k` of the list is state
/// `k` of the reduced network.
pub fn coarse_grain(
    flux: &ReactiveFlux,
    groups: &[Vec<usize>],
    tolerance: &Tolerance,
) -> Result<(Vec<StateSet>, ReactiveFlux), TptError> {
    let n = flux.n_states();
    validate_partition(groups, n)?;

    // Split each user group against the A/B boundary, keeping input order.
    let mut effective: Vec<Vec<usize>> = Vec::new();
    for group in groups {
        let mut in_source = Vec::new();
        let mut in_sink = Vec::new();
        let mut interior = Vec::new();
        for &state in group {
            if flux.source().contains(state) {
                in_source.push(state);
            } else if flux.sink().contains(state) {
                in_sink.push(state);
            } else {
                interior.push(state);
            }
        }
        for part in [in_source, in_sink, interior] {
            if !part.is_empty() {
                effective.push(part);
            }
        }
    }

    let k = effective.len();
    let mut membership = vec![0usize; n];
    for (g, group) in effective.iter().enumerate() {
        for &state in group {
            membership[state] = g;
        }
    }

    // Stationary weights and weighted committors per group.
    let mut lumped_pi = vec![0.0; k];
    let mut lumped_q_plus = vec![0.0; k];
    let mut lumped_q_minus = vec![0.0; k];
    for state in 0..n {
        let g = membership[state];
        let w = flux.stationary()[state];
        lumped_pi[g] += w;
        lumped_q_plus[g] += w * flux.forward_committor()[state];
        lumped_q_minus[g] += w * flux.backward_committor()[state];
    }
    for g in 0..k {
        // Group weights are positive because the stationary distribution is
        // strictly positive and every effective group is non-empty.
        lumped_q_plus[g] /= lumped_pi[g];
        lumped_q_minus[g] /= lumped_pi[g];
    }

    let mut lumped_gross = DMatrix::<f64>::zeros(k, k);
    for i in 0..n {
        for j in 0..n {
            let (gi, gj) = (membership[i], membership[j]);
            if gi == gj {
                continue;
            }
            let f = flux.gross_flux()[(i, j)];
            if f != 0.0 {
                lumped_gross[(gi, gj)] += f;
            }
        }
    }

    let mut source_groups = Vec::new();
    let mut sink_groups = Vec::new();
    for (g, group) in effective.iter().enumerate() {
        if group.iter().all(|&s| flux.source().contains(s)) {
            source_groups.push(g);
        } else if group.iter().all(|&s| flux.sink().contains(s)) {
            sink_groups.push(g);
        }
    }
    let lumped_source = StateSet::new(source_groups, k)?;
    let lumped_sink = StateSet::new(sink_groups, k)?;

    let reduced = ReactiveFlux::from_parts(
        lumped_source,
        lumped_sink,
        lumped_pi,
        lumped_q_plus,
        lumped_q_minus,
        lumped_gross,
        tolerance,
    )?;

    let sets = effective
        .into_iter()
        .map(|group| StateSet::new(group, n))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((sets, reduced))
}

fn validate_partition(groups: &[Vec<usize>], n: usize) -> Result<(), TptError> {
    let mut seen = vec![false; n];
    let mut covered = 0usize;
    for (g, group) in groups.iter().enumerate() {
        for &state in group {
            if state >= n {
                return Err(TptError::IncompleteCoverage(
                    ErrorInfo::new("index-out-of-range", "group member exceeds state count")
                        .with_context("group", g.to_string())
                        .with_context("state", state.to_string())
                        .with_context("n_states", n.to_string()),
                ));
            }
            if seen[state] {
                return Err(TptError::OverlappingGroups(
                    ErrorInfo::new("shared-state", "coarse-graining groups must be disjoint")
                        .with_context("group", g.to_string())
                        .with_context("state", state.to_string()),
                ));
            }
            seen[state] = true;
            covered += 1;
        }
    }
    if covered != n {
        let missing = seen.iter().position(|&s| !s).unwrap_or(0);
        return Err(TptError::IncompleteCoverage(
            ErrorInfo::new("uncovered-state", "groups must cover every state")
                .with_context("covered", covered.to_string())
                .with_context("n_states", n.to_string())
                .with_context("first_missing", missing.to_string()),
        ));
    }
    Ok(())
}
