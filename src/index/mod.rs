//! Reference-embedding index: query contract plus the flat loader.
//!
//! The engine only depends on [`SetIndex`]; [`FlatIndex`] is the concrete
//! implementation loaded once per game at startup from the files the index
//! builder emits. Indexes are read-only after load by contract; no request
//! path may mutate them.

pub mod error;
pub mod flat;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod model;


pub use error::IndexError;
pub use flat::FlatIndex;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSetIndex;
pub use model::{squared_l2, SearchHit, SetRecord};

/// Nearest-neighbor search over reference embeddings, with a parallel
/// row-to-set metadata table.
///
/// `search` returns, per query vector, hits sorted ascending by squared-L2
/// distance, at most `k` each.
pub trait SetIndex {
    /// Stored vector dimensionality.
    fn dim(&self) -> usize;

    /// Number of stored rows.
    fn rows(&self) -> usize;

    /// Batch nearest-neighbor lookup.
    fn search(&self, queries: &[Vec<f32>], k: usize) -> Result<Vec<Vec<SearchHit>>, IndexError>;

    /// Set identifier for a metadata row.
    fn set_id(&self, row: usize) -> Option<&str>;
}
