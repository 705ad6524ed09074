//! Fixed, era-keyed catalogs of set-symbol placements.
//!
//! The on-card position of the set symbol is a near-deterministic function of
//! game and print era, and the full set of historical placements is small and
//! enumerable. Rectangles are stored as fractions of canonical width/height;
//! overlapping variants per era tolerate imprecise rectification. Order
//! matters: candidates are emitted catalog-first, and the final entry is the
//! catch-all region the adaptive contour step runs against.

use crate::game::Game;

/// A normalized fractional rectangle, 0..1 of canonical width/height.
#[derive(Debug, Clone, Copy)]
pub struct FracRect {
    /// Stable identifier naming the placement convention.
    pub id: &'static str,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl FracRect {
    /// Converts to absolute pixel coordinates `(x, y, w, h)` against an
    /// image of the given dimensions. Clamped to image bounds; zero-sized
    /// results are the caller's concern (cannot happen for catalog entries
    /// against any non-trivial image size).
    pub fn to_pixels(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let x0 = (self.x0 * width as f32) as u32;
        let y0 = (self.y0 * height as f32) as u32;
        let x1 = ((self.x1 * width as f32) as u32).min(width);
        let y1 = ((self.y1 * height as f32) as u32).min(height);
        (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

const fn rect(id: &'static str, x0: f32, y0: f32, x1: f32, y1: f32) -> FracRect {
    FracRect { id, x0, y0, x1, y1 }
}

/// Pokemon set symbols moved around over the game's history:
/// WOTC era (1999-2003) mid-right of the artwork, e-Card era (2001-2003)
/// bottom center beside the dot code, EX/Diamond&Pearl era (2003-2011)
/// bottom-right corner, modern prints (2011+) bottom-left collector strip,
/// Black Star promos top-right.
const POKEMON_REGIONS: &[FracRect] = &[
    rect("wotc-right", 0.80, 0.52, 0.96, 0.66),
    rect("wotc-right-wide", 0.75, 0.48, 0.98, 0.70),
    rect("wotc-right-high", 0.78, 0.45, 0.95, 0.60),
    rect("ecard-bottom", 0.40, 0.92, 0.60, 0.98),
    rect("ecard-bottom-wide", 0.35, 0.90, 0.65, 0.99),
    rect("ecard-bottom-full", 0.30, 0.88, 0.70, 0.98),
    rect("exdp-bottom-right", 0.75, 0.88, 0.98, 0.98),
    rect("exdp-bottom-right-wide", 0.70, 0.85, 0.98, 0.99),
    rect("exdp-bottom-right-tight", 0.80, 0.90, 0.96, 0.97),
    rect("modern-bottom-left", 0.01, 0.89, 0.15, 0.97),
    rect("modern-bottom-left-wide", 0.01, 0.87, 0.35, 0.98),
    rect("modern-bottom-left-tight", 0.01, 0.90, 0.10, 0.96),
    rect("promo-top-right", 0.85, 0.02, 0.98, 0.08),
    rect("promo-top-right-wide", 0.80, 0.01, 0.99, 0.10),
    rect("catchall-bottom-left", 0.01, 0.92, 0.20, 0.99),
];

/// MTG set symbols sit mid-right between art and text box on both frame
/// generations, with collector info at the bottom; borderless and
/// extended-art treatments shift the band.
const MTG_REGIONS: &[FracRect] = &[
    rect("standard-right", 0.60, 0.42, 0.98, 0.58),
    rect("standard-right-tight", 0.65, 0.45, 0.95, 0.55),
    rect("standard-right-tall", 0.60, 0.35, 0.98, 0.70),
    rect("collector-bottom-right", 0.70, 0.88, 0.98, 0.98),
    rect("collector-bottom-left", 0.01, 0.90, 0.30, 0.98),
    rect("extended-art-right", 0.75, 0.38, 0.99, 0.62),
    rect("borderless-mid", 0.55, 0.40, 0.85, 0.60),
    rect("old-frame-right", 0.58, 0.48, 0.92, 0.56),
];

/// The ordered fixed-region catalog for a game.
pub fn fixed_regions(game: Game) -> &'static [FracRect] {
    match game {
        Game::Pokemon => POKEMON_REGIONS,
        Game::Mtg => MTG_REGIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CANONICAL_HEIGHT, CANONICAL_WIDTH};

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(fixed_regions(Game::Pokemon).len(), 15);
        assert_eq!(fixed_regions(Game::Mtg).len(), 8);
    }

    #[test]
    fn test_fractions_in_unit_square() {
        for game in Game::all() {
            for r in fixed_regions(game) {
                assert!(r.x0 >= 0.0 && r.x1 <= 1.0, "{} x out of range", r.id);
                assert!(r.y0 >= 0.0 && r.y1 <= 1.0, "{} y out of range", r.id);
                assert!(r.x0 < r.x1 && r.y0 < r.y1, "{} degenerate", r.id);
            }
        }
    }

    #[test]
    fn test_to_pixels_within_canonical_bounds() {
        for game in Game::all() {
            for r in fixed_regions(game) {
                let (x, y, w, h) = r.to_pixels(CANONICAL_WIDTH, CANONICAL_HEIGHT);
                assert!(w > 0 && h > 0, "{} collapsed", r.id);
                assert!(x + w <= CANONICAL_WIDTH, "{} exceeds width", r.id);
                assert!(y + h <= CANONICAL_HEIGHT, "{} exceeds height", r.id);
            }
        }
    }

    #[test]
    fn test_unique_ids() {
        for game in Game::all() {
            let mut ids: Vec<_> = fixed_regions(game).iter().map(|r| r.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), fixed_regions(game).len());
        }
    }

    #[test]
    fn test_to_pixels_truncates_like_flooring() {
        let r = rect("t", 0.80, 0.52, 0.96, 0.66);
        let (x, y, w, h) = r.to_pixels(744, 1040);
        assert_eq!((x, y), (595, 540));
        assert_eq!((x + w, y + h), (714, 686));
    }
}
