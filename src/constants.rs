//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//! The calibration thresholds here are load-bearing for accuracy and should
//! only change together with fresh calibration data.

/// Canonical rectified card width in pixels.
pub const CANONICAL_WIDTH: u32 = 744;

/// Canonical rectified card height in pixels.
pub const CANONICAL_HEIGHT: u32 = 1040;

/// Physical card aspect ratio band (2.5in x 3.5in is ~0.714). Inputs inside
/// this band are assumed to be pre-cropped card images.
pub const ASPECT_BAND_MIN: f32 = 0.65;
/// Upper bound of the pre-cropped aspect band.
pub const ASPECT_BAND_MAX: f32 = 0.80;

/// Max dimension of the downscaled working image used for quad detection.
pub const WORKING_MAX_DIM: u32 = 800;

/// Minimum detected-quad area as a fraction of the working image area.
pub const MIN_QUAD_AREA_RATIO: f64 = 0.10;

/// Hard cap on region candidates returned per request.
pub const MAX_CANDIDATES: usize = 10;

/// Max adaptive contour proposals appended after the fixed catalog.
pub const MAX_CONTOUR_PROPOSALS: usize = 6;

/// Default nearest-neighbor count per query vector.
pub const DEFAULT_TOP_K: usize = 20;

/// Top-1 similarity below this is independently low confidence.
pub const LOW_SCORE_THRESHOLD: f32 = 0.28;

/// Top-1/top-2 margin below this is independently low confidence.
pub const LOW_MARGIN_THRESHOLD: f32 = 0.03;

/// Per-crop vote agreement below this is independently low confidence.
pub const LOW_STABILITY_THRESHOLD: f32 = 0.60;

/// Error returned when collaborator vector dimensions disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// Use this at module boundaries (embedder output vs. index rows) to catch
/// mismatches early instead of producing silently wrong distances.
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 || actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
