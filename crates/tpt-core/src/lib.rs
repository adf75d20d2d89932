#![deny(missing_docs)]
#![doc = "Core types shared across the reactive flux engine: error taxonomy, state sets and numerical tolerances."]

pub mod errors;
pub mod sets;
pub mod tolerance;

pub use errors::{ErrorInfo, TptError};
pub use sets::StateSet;
pub use tolerance::Tolerance;
