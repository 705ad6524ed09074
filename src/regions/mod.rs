//! Era-aware region proposal over canonical card images.
//!
//! [`RegionProposer`] combines the fixed catalog in [`catalog`] with the
//! adaptive contour step in [`contour`]: fixed regions first, contour
//! proposals from the catch-all region last, truncated to the candidate cap.
//! Total over any image; a blank card still yields the catalog crops.

pub mod catalog;
mod contour;
pub mod types;


pub use catalog::{fixed_regions, FracRect};
pub use types::{BoxDebug, Provenance, ProposeDebug, RegionCandidate};

use image::imageops;
use image::RgbImage;
use tracing::debug;

use crate::constants::{MAX_CANDIDATES, MAX_CONTOUR_PROPOSALS};
use crate::game::Game;

/// Proposes an ordered, capped list of candidate set-symbol crops.
#[derive(Debug, Clone)]
pub struct RegionProposer {
    max_candidates: usize,
}

impl Default for RegionProposer {
    fn default() -> Self {
        Self {
            max_candidates: MAX_CANDIDATES,
        }
    }
}

impl RegionProposer {
    /// Proposer with the default candidate cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate crops for `game`, fixed catalog first, contour proposals
    /// last, truncated to the cap. Every returned box lies within the image.
    pub fn propose(&self, game: Game, canonical: &RgbImage) -> (Vec<RegionCandidate>, ProposeDebug) {
        let (width, height) = canonical.dimensions();

        let mut candidates: Vec<RegionCandidate> = Vec::new();
        for region in fixed_regions(game) {
            let (x, y, w, h) = region.to_pixels(width, height);
            if w == 0 || h == 0 {
                continue;
            }
            let image = imageops::crop_imm(canonical, x, y, w, h).to_image();
            candidates.push(RegionCandidate {
                x,
                y,
                w,
                h,
                provenance: Provenance::Fixed(region.id),
                image,
            });
        }

        // Adaptive step runs once, against the catalog's final (catch-all)
        // region, to isolate the actual symbol glyph.
        let mut contour_count = 0;
        if let Some(primary) = candidates.last() {
            let origin = (primary.x, primary.y);
            let proposals = contour::contour_proposals(&primary.image, origin);
            contour_count = proposals.len();
            candidates.extend(proposals.into_iter().take(MAX_CONTOUR_PROPOSALS).map(|p| {
                RegionCandidate {
                    x: p.x,
                    y: p.y,
                    w: p.w,
                    h: p.h,
                    provenance: Provenance::Contour,
                    image: p.image,
                }
            }));
        }

        candidates.truncate(self.max_candidates);

        let boxes = candidates.iter().map(BoxDebug::from).collect();
        debug!(
            game = %game,
            candidates = candidates.len(),
            contour_proposals = contour_count,
            "region proposal complete"
        );

        (
            candidates,
            ProposeDebug {
                boxes,
                contour_proposals: contour_count,
            },
        )
    }
}
