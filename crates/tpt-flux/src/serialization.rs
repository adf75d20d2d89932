//! JSON and binary round-trips for flux results.

use tpt_core::errors::{ErrorInfo, TptError};

use crate::flux::ReactiveFlux;

/// Serializes the flux result to a compact binary representation using
/// `bincode`.
pub fn flux_to_bytes(flux: &ReactiveFlux) -> Result<Vec<u8>, TptError> {
    bincode::serialize(flux)
        .map_err(|err| TptError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a flux result from its binary representation.
pub fn flux_from_bytes(bytes: &[u8]) -> Result<ReactiveFlux, TptError> {
    bincode::deserialize(bytes)
        .map_err(|err| TptError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))
}

/// Serializes the flux result to a JSON string.
pub fn flux_to_json(flux: &ReactiveFlux) -> Result<String, TptError> {
    serde_json::to_string_pretty(flux)
        .map_err(|err| TptError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a flux result from a JSON string.
pub fn flux_from_json(json: &str) -> Result<ReactiveFlux, TptError> {
    serde_json::from_str(json)
        .map_err(|err| TptError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))
}
