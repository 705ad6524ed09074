//! Perspective rectification of card photos into canonical images.
//!
//! [`PerspectiveNormalizer`] turns an arbitrary photo of a card into a
//! fixed-size, front-facing image. Inputs that are already card-shaped skip
//! geometric detection entirely; quad detection on pre-cropped scans risks
//! introducing distortion for no benefit. Degenerate geometry never fails,
//! it degrades through the fallbacks recorded in [`NormalizeDebug`].

pub mod rectify;
pub mod types;

#[cfg(test)]
mod tests;

pub use rectify::PerspectiveNormalizer;
pub use types::{Fallback, NormalizeDebug};
