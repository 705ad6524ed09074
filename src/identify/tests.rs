use std::collections::HashMap;

use image::{Rgb, RgbImage};

use super::confidence::calibrate;
use super::{cosine_from_squared_l2, IdentificationEngine, IdentifyError, SetCandidate};
use crate::constants::{CANONICAL_HEIGHT, CANONICAL_WIDTH};
use crate::embedding::{EmbeddingError, ImageEmbedder, MockEmbedder};
use crate::game::Game;
use crate::index::MockSetIndex;

/// Embeds every crop to the same fixed vector, so the nearest reference row
/// is fully controlled by the test.
struct ConstEmbedder {
    vector: Vec<f32>,
}

impl ImageEmbedder for ConstEmbedder {
    fn dim(&self) -> usize {
        self.vector.len()
    }

    fn embed(&self, crops: &[RgbImage]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(crops.iter().map(|_| self.vector.clone()).collect())
    }
}

fn candidate(set_id: &str, score: f32) -> SetCandidate {
    SetCandidate {
        set_id: set_id.to_string(),
        score,
    }
}

fn votes(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_cosine_from_squared_l2_identity() {
    assert_eq!(cosine_from_squared_l2(0.0), 1.0);
    assert_eq!(cosine_from_squared_l2(2.0), 0.0);
    assert_eq!(cosine_from_squared_l2(4.0), -1.0);
}

#[test]
fn test_calibrate_confident() {
    let candidates = [candidate("base1", 0.5), candidate("jungle", 0.4)];
    let per_crop_top = votes(&["base1", "base1", "jungle"]);

    let (confidence, low) = calibrate(&candidates, &per_crop_top);

    // Stability 2/3 clears the threshold; margin 0.1 maps to full
    // confidence (up to f32 rounding of the 0.5 - 0.4 subtraction).
    assert!(!low);
    assert!((confidence - 1.0).abs() < 1e-6);
}

#[test]
fn test_calibrate_weak_top1_is_low() {
    let candidates = [candidate("base1", 0.2)];
    let (_, low) = calibrate(&candidates, &votes(&["base1"]));
    assert!(low);
}

#[test]
fn test_calibrate_thin_margin_is_low() {
    let candidates = [candidate("base1", 0.5), candidate("jungle", 0.49)];
    let (confidence, low) = calibrate(&candidates, &votes(&["base1", "base1"]));
    assert!(low);
    // Margin ramp is tiny; score ramp dominates: (0.5 - 0.15) * 1.2.
    assert!((confidence - 0.42).abs() < 1e-5);
}

#[test]
fn test_calibrate_unstable_votes_is_low() {
    let candidates = [candidate("base1", 0.5), candidate("jungle", 0.3)];
    let (_, low) = calibrate(&candidates, &votes(&["jungle", "jungle", "base1"]));
    assert!(low);
}

#[test]
fn test_calibrate_no_candidates() {
    let (confidence, low) = calibrate(&[], &[]);
    assert_eq!(confidence, 0.0);
    assert!(low);
}

#[test]
fn test_calibrate_no_votes_counts_as_stable() {
    let candidates = [candidate("base1", 0.5), candidate("jungle", 0.3)];
    let (_, low) = calibrate(&candidates, &[]);
    assert!(!low);
}

#[test]
fn test_identify_index_not_loaded() {
    let indexes: HashMap<Game, MockSetIndex> = HashMap::new();
    let engine = IdentificationEngine::new(MockEmbedder::new(2), indexes).unwrap();

    let canonical = RgbImage::new(CANONICAL_WIDTH, CANONICAL_HEIGHT);
    let err = engine.identify(Game::Pokemon, &canonical).unwrap_err();

    assert!(matches!(
        err,
        IdentifyError::IndexNotLoaded {
            game: Game::Pokemon
        }
    ));
}

#[test]
fn test_construction_rejects_dimension_mismatch() {
    let mut indexes = HashMap::new();
    indexes.insert(
        Game::Pokemon,
        MockSetIndex::new(2).with_entry("base1", vec![1.0, 0.0]),
    );

    let err = IdentificationEngine::new(MockEmbedder::new(4), indexes).unwrap_err();

    assert!(matches!(err, IdentifyError::Dimension(_)));
}

#[test]
fn test_identify_no_candidates_skips_collaborators() {
    let mut indexes = HashMap::new();
    indexes.insert(
        Game::Pokemon,
        MockSetIndex::new(2).with_entry("base1", vec![1.0, 0.0]),
    );
    let engine = IdentificationEngine::new(MockEmbedder::new(2), indexes).unwrap();

    // A 1x1 image collapses every fractional region to a zero-area box.
    let result = engine.identify(Game::Pokemon, &RgbImage::new(1, 1)).unwrap();

    assert!(result.low_confidence);
    assert_eq!(result.confidence, 0.0);
    assert!(result.best_set_id.is_empty());
    assert!(result.candidates.is_empty());
    assert_eq!(engine.embedder().embed_calls(), 0);
    assert_eq!(engine.index(Game::Pokemon).unwrap().search_calls(), 0);
}

#[test]
fn test_identify_happy_path() {
    let mut indexes = HashMap::new();
    indexes.insert(
        Game::Mtg,
        MockSetIndex::new(2)
            .with_entry("mh2", vec![1.0, 0.0])
            .with_entry("neo", vec![0.0, 1.0]),
    );
    let embedder = ConstEmbedder {
        vector: vec![1.0, 0.0],
    };
    let engine = IdentificationEngine::new(embedder, indexes).unwrap();

    let canonical = RgbImage::from_pixel(CANONICAL_WIDTH, CANONICAL_HEIGHT, Rgb([40, 40, 40]));
    let result = engine.identify(Game::Mtg, &canonical).unwrap();

    assert_eq!(result.best_set_id, "mh2");
    assert!(!result.low_confidence);
    assert_eq!(result.confidence, 1.0);
    // Every crop hits the exact reference vector.
    assert_eq!(result.candidates[0].set_id, "mh2");
    assert!((result.candidates[0].score - 1.0).abs() < 1e-6);
    assert_eq!(result.candidates[1].set_id, "neo");
    assert!(result.candidates[1].score < result.candidates[0].score);
    assert!(!result.debug.per_crop_top.is_empty());
    assert!(result.debug.per_crop_top.iter().all(|top| top == "mh2"));
    assert_eq!(
        result.debug.per_crop_top.len(),
        result.debug.crops.boxes.len()
    );
}

#[test]
fn test_identify_with_k_truncates_candidates() {
    let mut indexes = HashMap::new();
    indexes.insert(
        Game::Mtg,
        MockSetIndex::new(2)
            .with_entry("mh2", vec![1.0, 0.0])
            .with_entry("neo", vec![0.0, 1.0])
            .with_entry("dmu", vec![-1.0, 0.0]),
    );
    let embedder = ConstEmbedder {
        vector: vec![1.0, 0.0],
    };
    let engine = IdentificationEngine::new(embedder, indexes).unwrap();

    let canonical = RgbImage::from_pixel(CANONICAL_WIDTH, CANONICAL_HEIGHT, Rgb([40, 40, 40]));
    let result = engine.identify_with_k(Game::Mtg, &canonical, 1).unwrap();

    // k = 1 keeps only the rank-0 row per crop, so a single set survives.
    assert_eq!(result.candidates.len(), 1);
    assert_eq!(result.best_set_id, "mh2");
}

#[test]
fn test_engine_debug_omits_collaborator_internals() {
    let mut indexes = HashMap::new();
    indexes.insert(
        Game::Pokemon,
        MockSetIndex::new(2).with_entry("base1", vec![1.0, 0.0]),
    );
    let engine = IdentificationEngine::new(MockEmbedder::new(2), indexes).unwrap();

    let rendered = format!("{:?}", engine);
    assert!(rendered.contains("IdentificationEngine"));
    assert!(rendered.contains("top_k"));
}

#[test]
fn test_identify_loaded_games() {
    let mut indexes = HashMap::new();
    indexes.insert(
        Game::Mtg,
        MockSetIndex::new(2).with_entry("mh2", vec![1.0, 0.0]),
    );
    let engine = IdentificationEngine::new(MockEmbedder::new(2), indexes).unwrap();

    assert_eq!(engine.loaded_games(), vec![Game::Mtg]);
    assert!(engine.index(Game::Pokemon).is_none());
}
