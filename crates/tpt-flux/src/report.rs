//! Serializable summary reports for downstream consumers.

use serde::{Deserialize, Serialize};
use tpt_core::errors::TptError;

use crate::flux::ReactiveFlux;
use crate::hash;

/// Flat summary of a reactive flux computation.
///
/// Carries the scalar results and the committor vectors, plus a canonical
/// hash so two runs can be compared without diffing full matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxReport {
    /// Number of states in the network.
    pub n_states: usize,
    /// Source set indices.
    pub source: Vec<usize>,
    /// Sink set indices.
    pub sink: Vec<usize>,
    /// Forward committor vector.
    pub forward_committor: Vec<f64>,
    /// Backward committor vector.
    pub backward_committor: Vec<f64>,
    /// Total A-to-B reactive flux.
    pub total_flux: f64,
    /// A-to-B reaction rate.
    pub rate: f64,
    /// Mean first passage time.
    pub mfpt: f64,
    /// Canonical hash of the report body.
    pub flux_hash: String,
}

/// Builds a summary report from a flux result.
pub fn build_report(flux: &ReactiveFlux) -> Result<FluxReport, TptError> {
    let mut report = FluxReport {
        n_states: flux.n_states(),
        source: flux.source().indices().to_vec(),
        sink: flux.sink().indices().to_vec(),
        forward_committor: flux.forward_committor().to_vec(),
        backward_committor: flux.backward_committor().to_vec(),
        total_flux: flux.total_flux(),
        rate: flux.rate(),
        mfpt: flux.mfpt(),
        flux_hash: String::new(),
    };
    report.flux_hash = hash::hash_report(&report)?;
    Ok(report)
}
