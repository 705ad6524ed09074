use serde::Serialize;

use crate::regions::ProposeDebug;

/// One ranked set with its aggregated similarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetCandidate {
    /// Set identifier.
    pub set_id: String,
    /// Maximum similarity observed for this set across all crops and
    /// neighbors, roughly in [-1, 1].
    pub score: f32,
}

/// Wall-clock milliseconds spent per pipeline stage.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageTimings {
    /// Region proposal and cropping.
    pub crop_ms: u64,
    /// Batch embedding.
    pub embed_ms: u64,
    /// Nearest-neighbor search and aggregation.
    pub search_ms: u64,
}

/// Diagnostic payload attached to every identification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IdentifyDebug {
    /// Region proposal record.
    pub crops: ProposeDebug,
    /// Each crop's rank-0 nearest set, in crop order.
    pub per_crop_top: Vec<String>,
}

/// Outcome of a single identification request.
#[derive(Debug, Clone, Serialize)]
pub struct IdentificationResult {
    /// Highest-scoring set, or empty when there was no evidence.
    pub best_set_id: String,
    /// Calibrated confidence in [0, 1].
    pub confidence: f32,
    /// Set when the answer should not be trusted without corroboration.
    pub low_confidence: bool,
    /// Ranked candidates, best first.
    pub candidates: Vec<SetCandidate>,
    /// Per-stage timings.
    pub timings_ms: StageTimings,
    /// Diagnostics.
    pub debug: IdentifyDebug,
}

impl IdentificationResult {
    /// The no-evidence result: zero region proposals mean there is nothing
    /// to score, which is reported as a valid low-confidence outcome rather
    /// than an error.
    pub(crate) fn no_evidence(timings_ms: StageTimings, debug: IdentifyDebug) -> Self {
        Self {
            best_set_id: String::new(),
            confidence: 0.0,
            low_confidence: true,
            candidates: Vec::new(),
            timings_ms,
            debug,
        }
    }
}
