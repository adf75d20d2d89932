//! Validated Markov-chain inputs for the reactive flux engine.
//!
//! The engine consumes a transition matrix and a stationary distribution
//! produced by an external estimator; this crate checks the structural
//! invariants (row stochasticity, positivity, normalization) once at the
//! boundary and hands out types the flux crate can trust. It also carries
//! the dense LU solver used by the committor boundary value problem.

pub mod reversal;
pub mod solve;
pub mod stationary;
pub mod transition;

pub use reversal::{is_reversible, time_reversal};
pub use solve::solve_dense;
pub use stationary::StationaryDistribution;
pub use transition::TransitionMatrix;
