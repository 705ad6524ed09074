use std::collections::HashMap;
use std::time::Instant;

use image::RgbImage;
use tracing::{debug, info};

use crate::constants::{validate_embedding_dim, DEFAULT_TOP_K};
use crate::embedding::{EmbeddingError, ImageEmbedder};
use crate::game::Game;
use crate::index::SetIndex;
use crate::regions::RegionProposer;

use super::confidence::{calibrate, cosine_from_squared_l2};
use super::error::IdentifyError;
use super::types::{IdentificationResult, IdentifyDebug, SetCandidate, StageTimings};

/// Batch set-symbol identification over canonical card images.
///
/// Owns one embedder shared by all games and one index per game. Read-only
/// after construction; a single instance serves concurrent requests behind
/// a shared reference.
pub struct IdentificationEngine<E, I> {
    embedder: E,
    indexes: HashMap<Game, I>,
    proposer: RegionProposer,
    top_k: usize,
}

impl<E, I> std::fmt::Debug for IdentificationEngine<E, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentificationEngine")
            .field("games", &self.indexes.keys().collect::<Vec<_>>())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl<E, I> IdentificationEngine<E, I>
where
    E: ImageEmbedder,
    I: SetIndex,
{
    /// Assembles the engine, verifying up front that every loaded index
    /// agrees with the embedder on vector dimensionality.
    pub fn new(embedder: E, indexes: HashMap<Game, I>) -> Result<Self, IdentifyError> {
        for index in indexes.values() {
            validate_embedding_dim(index.dim(), embedder.dim())?;
        }
        Ok(Self {
            embedder,
            indexes,
            proposer: RegionProposer::new(),
            top_k: DEFAULT_TOP_K,
        })
    }

    /// Overrides the per-query neighbor count.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Shared embedder.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Index for `game`, if one was loaded.
    pub fn index(&self, game: Game) -> Option<&I> {
        self.indexes.get(&game)
    }

    /// Games with a loaded index.
    pub fn loaded_games(&self) -> Vec<Game> {
        Game::all().into_iter().filter(|g| self.indexes.contains_key(g)).collect()
    }

    /// Identifies the set of a canonical card image using the engine's
    /// configured neighbor count.
    pub fn identify(
        &self,
        game: Game,
        canonical: &RgbImage,
    ) -> Result<IdentificationResult, IdentifyError> {
        self.identify_with_k(game, canonical, self.top_k)
    }

    /// Identifies the set of a canonical card image, retrieving `k` nearest
    /// neighbors per crop.
    ///
    /// Stages run strictly in order: propose regions, embed all crops in one
    /// batch, search all queries in one batch, aggregate per-set maxima,
    /// calibrate. Zero proposals short-circuit to a low-confidence empty
    /// result without touching the embedder or the index.
    pub fn identify_with_k(
        &self,
        game: Game,
        canonical: &RgbImage,
        k: usize,
    ) -> Result<IdentificationResult, IdentifyError> {
        let index = self
            .indexes
            .get(&game)
            .ok_or(IdentifyError::IndexNotLoaded { game })?;

        let mut timings = StageTimings::default();

        let started = Instant::now();
        let (candidates, crop_debug) = self.proposer.propose(game, canonical);
        timings.crop_ms = started.elapsed().as_millis() as u64;

        if candidates.is_empty() {
            debug!(game = %game, "no region candidates; returning no-evidence result");
            return Ok(IdentificationResult::no_evidence(
                timings,
                IdentifyDebug {
                    crops: crop_debug,
                    per_crop_top: Vec::new(),
                },
            ));
        }

        let crops: Vec<RgbImage> = candidates.into_iter().map(|c| c.image).collect();

        let started = Instant::now();
        let embeddings = self.embedder.embed(&crops)?;
        timings.embed_ms = started.elapsed().as_millis() as u64;

        if embeddings.len() != crops.len() {
            return Err(IdentifyError::Embedding(EmbeddingError::BatchMismatch {
                crops: crops.len(),
                vectors: embeddings.len(),
            }));
        }
        if let Some(first) = embeddings.first() {
            validate_embedding_dim(first.len(), index.dim())?;
        }

        let started = Instant::now();
        let per_crop_hits = index.search(&embeddings, k)?;

        let mut best_per_set: HashMap<&str, f32> = HashMap::new();
        let mut per_crop_top: Vec<String> = Vec::with_capacity(per_crop_hits.len());
        for hits in &per_crop_hits {
            if let Some(top) = hits.first() {
                if let Some(set_id) = index.set_id(top.row) {
                    per_crop_top.push(set_id.to_string());
                }
            }
            for hit in hits {
                let Some(set_id) = index.set_id(hit.row) else {
                    continue;
                };
                let score = cosine_from_squared_l2(hit.distance);
                best_per_set
                    .entry(set_id)
                    .and_modify(|s| *s = s.max(score))
                    .or_insert(score);
            }
        }

        let mut ranked: Vec<SetCandidate> = best_per_set
            .into_iter()
            .map(|(set_id, score)| SetCandidate {
                set_id: set_id.to_string(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(k);
        timings.search_ms = started.elapsed().as_millis() as u64;

        let (confidence, low_confidence) = calibrate(&ranked, &per_crop_top);
        let best_set_id = ranked
            .first()
            .map(|c| c.set_id.clone())
            .unwrap_or_default();

        info!(
            game = %game,
            best = %best_set_id,
            confidence,
            low_confidence,
            crops = crops.len(),
            crop_ms = timings.crop_ms,
            embed_ms = timings.embed_ms,
            search_ms = timings.search_ms,
            "identification complete"
        );

        Ok(IdentificationResult {
            best_set_id,
            confidence,
            low_confidence,
            candidates: ranked,
            timings_ms: timings,
            debug: IdentifyDebug {
                crops: crop_debug,
                per_crop_top,
            },
        })
    }
}
