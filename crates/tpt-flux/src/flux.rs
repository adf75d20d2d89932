//! Reactive flux assembly: gross/net flux, total flux, rate and MFPT.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tpt_core::errors::{ErrorInfo, TptError};
use tpt_core::{StateSet, Tolerance};
use tpt_markov::{StationaryDistribution, TransitionMatrix};

use crate::committor::{
    backward_from_forward, ensure_matching_dimension, forward_committor, validate_sets,
};

/// Immutable result of a reactive flux computation.
///
/// Constructed once from validated inputs; changing the source or sink sets
/// means computing a fresh object. This avoids the staleness bugs of
/// mutable-attribute designs where derived quantities silently outlive the
/// inputs they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactiveFlux {
    source: StateSet,
    sink: StateSet,
    stationary: Vec<f64>,
    forward_committor: Vec<f64>,
    backward_committor: Vec<f64>,
    gross_flux: DMatrix<f64>,
    net_flux: DMatrix<f64>,
    total_flux: f64,
    rate: f64,
    mfpt: f64,
}

impl ReactiveFlux {
    /// Runs the full pipeline: committors, gross and net flux, scalars.
    ///
    /// The forward committor is solved once and reused for the backward
    /// committor when detailed balance holds. The gross flux is
    /// `f_ij = q-_i pi_i P_ij q+_j` for `i != j` with a zero diagonal; the
    /// net flux is `max(0, f_ij - f_ji)`.
    pub fn compute(
        transition: &TransitionMatrix,
        stationary: &StationaryDistribution,
        source: &StateSet,
        sink: &StateSet,
        tolerance: &Tolerance,
    ) -> Result<Self, TptError> {
        validate_sets(transition, source, sink)?;
        ensure_matching_dimension(transition, stationary)?;
        let n = transition.n_states();
        let q_plus = forward_committor(transition, source, sink, tolerance)?;
        let q_minus =
            backward_from_forward(transition, stationary, source, sink, &q_plus, tolerance)?;

        let mut gross = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            let weight = q_minus[i] * stationary.weight(i);
            if weight == 0.0 {
                continue;
            }
            for j in 0..n {
                if i == j {
                    continue;
                }
                gross[(i, j)] = weight * transition.prob(i, j) * q_plus[j];
            }
        }

        Self::from_parts(
            source.clone(),
            sink.clone(),
            stationary.as_slice().to_vec(),
            q_plus,
            q_minus,
            gross,
            tolerance,
        )
    }

    /// Assembles a result object from an already-computed gross flux.
    ///
    /// This is the entry point shared by [`ReactiveFlux::compute`] and the
    /// coarse-graining path, where the lumped gross flux is summed from an
    /// existing fine-grained network instead of being derived from a
    /// transition matrix.
    pub fn from_parts(
        source: StateSet,
        sink: StateSet,
        stationary: Vec<f64>,
        forward_committor: Vec<f64>,
        backward_committor: Vec<f64>,
        gross_flux: DMatrix<f64>,
        tolerance: &Tolerance,
    ) -> Result<Self, TptError> {
        if gross_flux.nrows() != gross_flux.ncols() {
            return Err(TptError::Input(
                ErrorInfo::new("not-square", "gross flux matrix must be square")
                    .with_context("nrows", gross_flux.nrows().to_string())
                    .with_context("ncols", gross_flux.ncols().to_string()),
            ));
        }
        let n = gross_flux.nrows();
        for (label, len) in [
            ("stationary", stationary.len()),
            ("forward_committor", forward_committor.len()),
            ("backward_committor", backward_committor.len()),
        ] {
            if len != n {
                return Err(TptError::Input(
                    ErrorInfo::new("dimension-mismatch", "vector length must match flux dimension")
                        .with_context("vector", label.to_string())
                        .with_context("dim", n.to_string())
                        .with_context("len", len.to_string()),
                ));
            }
        }

        let mut net = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let diff = gross_flux[(i, j)] - gross_flux[(j, i)];
                if diff > 0.0 {
                    net[(i, j)] = diff;
                }
            }
        }

        let mut total_flux = 0.0;
        for &i in source.indices() {
            for j in 0..n {
                if !source.contains(j) {
                    total_flux += gross_flux[(i, j)];
                }
            }
        }
        if total_flux <= tolerance.rate_floor {
            return Err(TptError::DegenerateFlux(
                ErrorInfo::new("zero-total-flux", "no reactive flux leaves the source set")
                    .with_context("total_flux", total_flux.to_string())
                    .with_hint("the sink is unreachable from the source; check connectivity"),
            ));
        }

        let denominator: f64 = (0..n).map(|i| stationary[i] * backward_committor[i]).sum();
        if denominator <= tolerance.rate_floor {
            return Err(TptError::DegenerateFlux(
                ErrorInfo::new("zero-rate-denominator", "rate denominator vanished")
                    .with_context("denominator", denominator.to_string())
                    .with_hint("the source set carries no stationary weight; check reachability"),
            ));
        }
        let rate = total_flux / denominator;
        let mfpt = 1.0 / rate;

        Ok(Self {
            source,
            sink,
            stationary,
            forward_committor,
            backward_committor,
            gross_flux,
            net_flux: net,
            total_flux,
            rate,
            mfpt,
        })
    }

    /// Returns the number of states in the flux network.
    pub fn n_states(&self) -> usize {
        self.gross_flux.nrows()
    }

    /// Returns the source set `A`.
    pub fn source(&self) -> &StateSet {
        &self.source
    }

    /// Returns the sink set `B`.
    pub fn sink(&self) -> &StateSet {
        &self.sink
    }

    /// Returns the stationary weights the flux was computed from.
    pub fn stationary(&self) -> &[f64] {
        &self.stationary
    }

    /// Returns the forward committor `q+`.
    pub fn forward_committor(&self) -> &[f64] {
        &self.forward_committor
    }

    /// Returns the backward committor `q-`.
    pub fn backward_committor(&self) -> &[f64] {
        &self.backward_committor
    }

    /// Returns the gross flux matrix `f`.
    pub fn gross_flux(&self) -> &DMatrix<f64> {
        &self.gross_flux
    }

    /// Returns the net flux matrix `f+ = max(0, f_ij - f_ji)`.
    pub fn net_flux(&self) -> &DMatrix<f64> {
        &self.net_flux
    }

    /// Returns the total A-to-B reactive flux.
    pub fn total_flux(&self) -> f64 {
        self.total_flux
    }

    /// Returns the A-to-B reaction rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the mean first passage time `1 / rate`.
    pub fn mfpt(&self) -> f64 {
        self.mfpt
    }
}
