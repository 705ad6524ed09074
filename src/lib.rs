//! Set-symbol identification for trading card photos.
//!
//! The pipeline turns a phone photo of a card into a ranked list of set
//! identifiers in three stages:
//!
//! 1. [`PerspectiveNormalizer`] rectifies the photo onto a canonical
//!    744x1040 card image.
//! 2. [`RegionProposer`] crops candidate set-symbol regions: an era-keyed
//!    fixed catalog first, adaptive contour proposals second.
//! 3. [`IdentificationEngine`] embeds all crops in one batch, searches the
//!    per-game reference index in one batch, aggregates per-set maxima, and
//!    calibrates a confidence score.
//!
//! # Public API Surface
//!
//! ## Pipeline (Stable)
//! - [`PerspectiveNormalizer`], [`NormalizeDebug`], [`Fallback`]
//! - [`RegionProposer`], [`RegionCandidate`], [`Provenance`]
//! - [`IdentificationEngine`], [`IdentificationResult`], [`SetCandidate`]
//!
//! ## Collaborator Contracts
//! - [`ImageEmbedder`] - batch image embedding (the model lives outside
//!   this crate)
//! - [`SetIndex`] - nearest-neighbor search over reference embeddings;
//!   [`FlatIndex`] is the bundled memory-mapped implementation
//!
//! ## Utilities
//! - [`Config`], [`ConfigError`] - environment-backed configuration
//! - [`Game`] - supported trading card games
//! - [`validate_embedding_dim`] - collaborator dimension checks
//!
//! ## Test/Mock Support
//! Mock collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod game;
pub mod geometry;
pub mod identify;
pub mod index;
pub mod normalize;
pub mod regions;

pub use config::{Config, ConfigError};
pub use constants::{
    validate_embedding_dim, DimValidationError, CANONICAL_HEIGHT, CANONICAL_WIDTH,
    DEFAULT_TOP_K, MAX_CANDIDATES,
};
pub use embedding::{EmbeddingError, ImageEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use game::{Game, GameParseError};
pub use geometry::Quad;
pub use identify::{
    cosine_from_squared_l2, IdentificationEngine, IdentificationResult, IdentifyDebug,
    IdentifyError, SetCandidate, StageTimings,
};
pub use index::{FlatIndex, IndexError, SearchHit, SetIndex, SetRecord};
#[cfg(any(test, feature = "mock"))]
pub use index::MockSetIndex;
pub use normalize::{Fallback, NormalizeDebug, PerspectiveNormalizer};
pub use regions::{BoxDebug, Provenance, ProposeDebug, RegionCandidate, RegionProposer};
