//! Transition path theory reactive flux engine.
//!
//! Given a row-stochastic transition matrix, its stationary distribution and
//! two disjoint state sets `A` (source) and `B` (sink), the engine computes
//! forward and backward committors, gross and net reactive flux, the total
//! A-to-B flux, the reaction rate and mean first passage time, an iterative
//! widest-path pathway decomposition, and exact coarse-graining onto a hard
//! partition of the state space.
//!
//! Every computation consumes immutable inputs and returns a fresh
//! [`ReactiveFlux`] value object; nothing is recomputed behind the caller's
//! back when inputs change.

pub mod coarse;
pub mod committor;
pub mod flux;
pub mod hash;
pub mod pathways;
pub mod report;
pub mod serialization;

pub use coarse::coarse_grain;
pub use committor::{backward_committor, forward_committor};
pub use flux::ReactiveFlux;
pub use hash::{hash_flux, hash_pathways, hash_report};
pub use pathways::{decompose_pathways, Pathway, PathwayDecomposition, PathwayOpts};
pub use report::{build_report, FluxReport};
pub use serialization::{flux_from_bytes, flux_from_json, flux_to_bytes, flux_to_json};
