//! Domain models for ESAS assessments.

mod assessment;
mod envelope;
mod roster;

pub use assessment::*;
pub use envelope::*;
pub use roster::*;
