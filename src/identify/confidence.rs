//! Score mapping and confidence calibration.
//!
//! All thresholds live in [`crate::constants`] and were fit against a
//! labeled photo corpus; change them only with fresh calibration data.

use crate::constants::{LOW_MARGIN_THRESHOLD, LOW_SCORE_THRESHOLD, LOW_STABILITY_THRESHOLD};

use super::types::SetCandidate;

/// Maps a squared-L2 distance between unit vectors onto cosine similarity.
///
/// For unit vectors `|a - b|^2 = 2 - 2*cos(a, b)`, so `cos = 1 - d/2`.
pub fn cosine_from_squared_l2(distance: f32) -> f32 {
    1.0 - distance / 2.0
}

/// Calibrated confidence plus the low-confidence verdict.
///
/// Three independent signals each force `low_confidence` on their own:
/// a weak top-1 score, a thin top-1/top-2 margin, and poor per-crop vote
/// agreement. The confidence value itself is the better of a shifted-score
/// ramp and a margin ramp, clamped to [0, 1].
pub(crate) fn calibrate(candidates: &[SetCandidate], per_crop_top: &[String]) -> (f32, bool) {
    let top1 = match candidates.first() {
        Some(c) => c.score,
        None => return (0.0, true),
    };
    let top2 = candidates.get(1).map(|c| c.score).unwrap_or(0.0);
    let margin = top1 - top2;
    let stability = vote_stability(candidates, per_crop_top);

    let low_confidence = top1 < LOW_SCORE_THRESHOLD
        || margin < LOW_MARGIN_THRESHOLD
        || stability < LOW_STABILITY_THRESHOLD;

    let score_conf = ((top1 - 0.15) * 1.2).clamp(0.0, 1.0);
    let margin_conf = (margin * 10.0).clamp(0.0, 1.0);
    let confidence = score_conf.max(margin_conf);

    (confidence, low_confidence)
}

/// Fraction of per-crop rank-0 votes that agree with the best set.
///
/// No votes at all means there is nothing to disagree with, which counts
/// as fully stable rather than unstable.
fn vote_stability(candidates: &[SetCandidate], per_crop_top: &[String]) -> f32 {
    if per_crop_top.is_empty() {
        return 1.0;
    }
    let best = match candidates.first() {
        Some(c) => c.set_id.as_str(),
        None => return 1.0,
    };
    let agreeing = per_crop_top.iter().filter(|top| *top == best).count();
    agreeing as f32 / per_crop_top.len() as f32
}
