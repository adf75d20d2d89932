//! Structured error types shared across the TPT crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`TptError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (state indices, dimensions, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the reactive flux engine.
///
/// All failures are detected eagerly, before heavy computation starts, and
/// surfaced to the caller; there is no silent recovery. Partial pathway
/// decompositions capped by `maxiter` are valid results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TptError {
    /// Malformed transition matrix or stationary distribution.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Empty or out-of-range source/sink state set.
    #[error("invalid state set: {0}")]
    InvalidStateSet(ErrorInfo),
    /// Source and sink sets intersect.
    #[error("overlapping sets: {0}")]
    OverlappingSets(ErrorInfo),
    /// Committor boundary value problem is unsolvable.
    #[error("singular system: {0}")]
    SingularSystem(ErrorInfo),
    /// Rate denominator vanished; the flux network is degenerate.
    #[error("degenerate flux: {0}")]
    DegenerateFlux(ErrorInfo),
    /// Coarse-graining groups are not pairwise disjoint.
    #[error("overlapping groups: {0}")]
    OverlappingGroups(ErrorInfo),
    /// Coarse-graining groups do not cover the state space.
    #[error("incomplete coverage: {0}")]
    IncompleteCoverage(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl TptError {
    /// Returns the structured payload carried by the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TptError::Input(info)
            | TptError::InvalidStateSet(info)
            | TptError::OverlappingSets(info)
            | TptError::SingularSystem(info)
            | TptError::DegenerateFlux(info)
            | TptError::OverlappingGroups(info)
            | TptError::IncompleteCoverage(info)
            | TptError::Serde(info) => info,
        }
    }
}
