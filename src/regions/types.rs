use image::RgbImage;
use serde::Serialize;

/// How a region candidate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "id")]
pub enum Provenance {
    /// One of the fixed era-keyed catalog rectangles.
    Fixed(&'static str),
    /// An adaptive contour proposal from the catch-all region.
    Contour,
}

impl Provenance {
    /// Returns `true` for fixed-catalog candidates.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Provenance::Fixed(_))
    }
}

/// A candidate crop likely to contain the set symbol.
#[derive(Debug, Clone)]
pub struct RegionCandidate {
    /// Left edge in canonical-image pixels.
    pub x: u32,
    /// Top edge in canonical-image pixels.
    pub y: u32,
    /// Width in pixels, always > 0.
    pub w: u32,
    /// Height in pixels, always > 0.
    pub h: u32,
    /// How this candidate was produced.
    pub provenance: Provenance,
    /// The cropped sub-image.
    pub image: RgbImage,
}

/// One candidate box, as recorded for reproducibility.
#[derive(Debug, Clone, Serialize)]
pub struct BoxDebug {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    /// Fixed-region id or `"contour"`.
    pub source: String,
}

/// Diagnostic record of a single proposal run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProposeDebug {
    /// Every returned candidate box, in order.
    pub boxes: Vec<BoxDebug>,
    /// Contour proposals found before the candidate cap was applied.
    pub contour_proposals: usize,
}

impl From<&RegionCandidate> for BoxDebug {
    fn from(candidate: &RegionCandidate) -> Self {
        let source = match candidate.provenance {
            Provenance::Fixed(id) => id.to_string(),
            Provenance::Contour => "contour".to_string(),
        };
        BoxDebug {
            x: candidate.x,
            y: candidate.y,
            w: candidate.w,
            h: candidate.h,
            source,
        }
    }
}
