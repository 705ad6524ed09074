use serde::Serialize;

/// Which degraded path produced the output, when quad-based warping did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// Input aspect already card-shaped; plain high-quality resize.
    DirectResize,
    /// No 4-vertex polygon passed the area gate; used the minimum-area
    /// rectangle of the largest contour.
    MinAreaRect,
    /// No contours at all, or the detected quad was degenerate; plain resize.
    PlainResize,
}

impl Fallback {
    /// Stable string identifier, as recorded in debug payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fallback::DirectResize => "direct-resize",
            Fallback::MinAreaRect => "min-area-rect",
            Fallback::PlainResize => "plain-resize",
        }
    }
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic record of a single normalization run.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeDebug {
    /// Whether a 4-vertex polygon passed the area gate.
    pub found_quad: bool,
    /// Degraded path taken, if any. `None` means the gated quad path warped.
    pub fallback: Option<Fallback>,
    /// Output width in pixels.
    pub out_w: u32,
    /// Output height in pixels.
    pub out_h: u32,
    /// Quad area over working-image area, recorded only when the gated path
    /// accepted a quad.
    pub quad_area_ratio: Option<f32>,
}
