//! Canonical SHA-256 hashes of flux results for provenance comparison.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tpt_core::errors::{ErrorInfo, TptError};

use crate::flux::ReactiveFlux;
use crate::pathways::PathwayDecomposition;
use crate::report::FluxReport;

fn hash_json<T: Serialize>(value: &T) -> Result<String, TptError> {
    let json = serde_json::to_vec(value)
        .map_err(|err| TptError::Serde(ErrorInfo::new("serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical hash of a reactive flux result.
pub fn hash_flux(flux: &ReactiveFlux) -> Result<String, TptError> {
    hash_json(flux)
}

/// Computes the canonical hash of a pathway decomposition.
pub fn hash_pathways(decomposition: &PathwayDecomposition) -> Result<String, TptError> {
    hash_json(decomposition)
}

/// Computes the canonical hash of a flux report, ignoring any hash already
/// stored inside it.
pub fn hash_report(report: &FluxReport) -> Result<String, TptError> {
    let mut blank = report.clone();
    blank.flux_hash = String::new();
    hash_json(&blank)
}
