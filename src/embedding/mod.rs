//! Image embedding collaborator contract.
//!
//! The embedding model itself lives outside this crate; the engine only
//! depends on the [`ImageEmbedder`] contract. Implementations must be
//! read-only after construction so concurrent requests can share one
//! instance behind a reference.

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;

use image::RgbImage;

/// Batch image embedder producing L2-normalized vectors.
///
/// Contract:
/// - output vectors are unit-norm and of fixed dimensionality [`dim`](ImageEmbedder::dim);
/// - output order matches input order;
/// - deterministic: the same crop always embeds to the same vector;
/// - no internal mutable state observable across calls.
pub trait ImageEmbedder {
    /// Embedding vector dimensionality.
    fn dim(&self) -> usize;

    /// Embeds a batch of crops in a single call.
    fn embed(&self, crops: &[RgbImage]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
