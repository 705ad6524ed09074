use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by embedding collaborators.
pub enum EmbeddingError {
    /// The embedding backend failed to produce vectors.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed {
        /// Backend error message.
        reason: String,
    },

    /// The backend returned a different number of vectors than crops.
    #[error("embedding batch mismatch: {crops} crops in, {vectors} vectors out")]
    BatchMismatch {
        /// Crops submitted.
        crops: usize,
        /// Vectors returned.
        vectors: usize,
    },

    /// A returned vector had the wrong dimensionality.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
