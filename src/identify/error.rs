use thiserror::Error;

use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;
use crate::game::Game;
use crate::index::IndexError;

/// Errors surfaced by the identification engine.
#[derive(Debug, Error)]
pub enum IdentifyError {
    /// No reference index was loaded for the requested game.
    #[error("no index loaded for game '{game}'")]
    IndexNotLoaded { game: Game },

    /// The embedder rejected or failed on the crop batch.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The index rejected or failed on the query batch.
    #[error("index search failed: {0}")]
    Search(#[from] IndexError),

    /// Embedder and index disagree on vector dimensionality.
    #[error("collaborator dimension mismatch: {0}")]
    Dimension(#[from] DimValidationError),
}
