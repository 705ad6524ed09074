//! Set identification: batch embed, batch search, aggregate, calibrate.
//!
//! [`IdentificationEngine`] is the pipeline's final stage. It consumes
//! canonical card images, delegates cropping to
//! [`RegionProposer`](crate::regions::RegionProposer), and turns raw
//! nearest-neighbor distances into a ranked, confidence-calibrated answer.

mod confidence;
mod engine;
mod error;
mod types;

#[cfg(test)]
mod tests;

pub use confidence::cosine_from_squared_l2;
pub use engine::IdentificationEngine;
pub use error::IdentifyError;
pub use types::{IdentificationResult, IdentifyDebug, SetCandidate, StageTimings};
