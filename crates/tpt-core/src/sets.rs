//! Validated sets of state indices.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, TptError};

/// A non-empty, sorted, duplicate-free set of state indices.
///
/// States are plain indices into `0..n`; the engine never deals in
/// heterogeneous state labels, mapping those to indices is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSet {
    indices: Vec<usize>,
}

impl StateSet {
    /// Builds a state set from raw indices, validated against `n_states`.
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        n_states: usize,
    ) -> Result<Self, TptError> {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            return Err(TptError::InvalidStateSet(ErrorInfo::new(
                "empty-set",
                "state set must contain at least one state",
            )));
        }
        if let Some(&last) = indices.last() {
            if last >= n_states {
                return Err(TptError::InvalidStateSet(
                    ErrorInfo::new("index-out-of-range", "state index exceeds state count")
                        .with_context("index", last.to_string())
                        .with_context("n_states", n_states.to_string()),
                ));
            }
        }
        Ok(Self { indices })
    }

    /// Returns the sorted member indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the number of member states.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true when the set has no members; always false after
    /// construction, which rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns true when the given state is a member.
    pub fn contains(&self, state: usize) -> bool {
        self.indices.binary_search(&state).is_ok()
    }

    /// Returns the largest member index, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Fails with [`TptError::OverlappingSets`] when the two sets intersect.
    pub fn ensure_disjoint(a: &StateSet, b: &StateSet) -> Result<(), TptError> {
        if let Some(&shared) = a.indices.iter().find(|idx| b.contains(**idx)) {
            return Err(TptError::OverlappingSets(
                ErrorInfo::new("shared-state", "source and sink sets must be disjoint")
                    .with_context("state", shared.to_string()),
            ));
        }
        Ok(())
    }
}
