use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::contours::{find_contours_with_threshold, BorderType, Contour};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use imageproc::geometry::{approximate_polygon_dp, arc_length, min_area_rect};
use tracing::{debug, warn};

use crate::constants::{
    ASPECT_BAND_MAX, ASPECT_BAND_MIN, CANONICAL_HEIGHT, CANONICAL_WIDTH, MIN_QUAD_AREA_RATIO,
    WORKING_MAX_DIM,
};
use crate::geometry::{polygon_area, Quad};

use super::types::{Fallback, NormalizeDebug};

/// Canny hysteresis thresholds for card edge detection.
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;

/// Blur applied before edge detection to suppress sensor noise.
const EDGE_BLUR_SIGMA: f32 = 1.1;

/// Contours considered for polygon approximation, largest first.
const MAX_CONTOURS: usize = 25;

/// Polygon approximation tolerance as a fraction of contour perimeter.
const APPROX_EPSILON_FRAC: f64 = 0.02;

/// Rectifies an arbitrary card photo into a fixed-size canonical image.
///
/// Total over valid decoded images: every input produces an output of the
/// requested size, degrading through documented fallbacks instead of failing.
#[derive(Debug, Clone)]
pub struct PerspectiveNormalizer {
    out_width: u32,
    out_height: u32,
}

impl Default for PerspectiveNormalizer {
    fn default() -> Self {
        Self {
            out_width: CANONICAL_WIDTH,
            out_height: CANONICAL_HEIGHT,
        }
    }
}

impl PerspectiveNormalizer {
    /// Normalizer producing the default 744x1040 canonical card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the output dimensions.
    pub fn with_output_size(out_width: u32, out_height: u32) -> Self {
        Self {
            out_width,
            out_height,
        }
    }

    /// Output dimensions as `(width, height)`.
    pub fn output_size(&self) -> (u32, u32) {
        (self.out_width, self.out_height)
    }

    /// Rectifies `image` into the canonical output size.
    ///
    /// Already card-shaped inputs (aspect inside the physical-card band) take
    /// a direct-resize fast path; everything else goes through quad detection
    /// with deterministic fallbacks. See [`NormalizeDebug`] for which path
    /// fired.
    pub fn normalize(&self, image: &RgbImage) -> (RgbImage, NormalizeDebug) {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return self.plain_resize(image, false);
        }

        let aspect = w as f32 / h as f32;
        if (ASPECT_BAND_MIN..=ASPECT_BAND_MAX).contains(&aspect) {
            debug!(aspect, "input already card-shaped, direct resize");
            let out = imageops::resize(image, self.out_width, self.out_height, FilterType::Lanczos3);
            return (
                out,
                NormalizeDebug {
                    found_quad: false,
                    fallback: Some(Fallback::DirectResize),
                    out_w: self.out_width,
                    out_h: self.out_height,
                    quad_area_ratio: None,
                },
            );
        }

        let scale = WORKING_MAX_DIM as f32 / w.max(h) as f32;
        let work_w = ((w as f32 * scale) as u32).max(1);
        let work_h = ((h as f32 * scale) as u32).max(1);
        let working = imageops::resize(image, work_w, work_h, FilterType::Triangle);

        let gray = imageops::grayscale(&working);
        let blurred = gaussian_blur_f32(&gray, EDGE_BLUR_SIGMA);
        let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);

        let mut contours: Vec<Contour<i32>> = find_contours_with_threshold(&edges, 0)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer)
            .collect();
        contours.sort_by(|a, b| {
            polygon_area(&b.points)
                .abs()
                .total_cmp(&polygon_area(&a.points).abs())
        });
        contours.truncate(MAX_CONTOURS);

        if contours.is_empty() {
            warn!("no contours found, plain resize");
            return self.plain_resize(image, false);
        }

        let working_area = (work_w * work_h) as f64;
        let mut quad = None;
        let mut area_ratio = None;
        for contour in &contours {
            let peri = arc_length(&contour.points, true);
            let approx = approximate_polygon_dp(&contour.points, APPROX_EPSILON_FRAC * peri, true);
            if approx.len() != 4 {
                continue;
            }
            let area = polygon_area(&approx).abs();
            if area < MIN_QUAD_AREA_RATIO * working_area {
                // Small quads amid background clutter are not the card.
                continue;
            }
            quad = Some(Quad::from_unordered([
                (approx[0].x as f32, approx[0].y as f32),
                (approx[1].x as f32, approx[1].y as f32),
                (approx[2].x as f32, approx[2].y as f32),
                (approx[3].x as f32, approx[3].y as f32),
            ]));
            area_ratio = Some((area / working_area) as f32);
            break;
        }

        let (quad, found_quad, fallback) = match quad {
            Some(q) => (q, true, None),
            None => {
                debug!("no gated quad, falling back to min-area rect of largest contour");
                let rect = min_area_rect(&contours[0].points);
                let q = Quad::from_unordered([
                    (rect[0].x as f32, rect[0].y as f32),
                    (rect[1].x as f32, rect[1].y as f32),
                    (rect[2].x as f32, rect[2].y as f32),
                    (rect[3].x as f32, rect[3].y as f32),
                ]);
                (q, false, Some(Fallback::MinAreaRect))
            }
        };

        // Map back to full-resolution coordinates and warp the original
        // image, not the working copy, to preserve detail.
        let quad = quad.scaled(1.0 / scale);
        let dst = [
            (0.0, 0.0),
            (self.out_width as f32 - 1.0, 0.0),
            (self.out_width as f32 - 1.0, self.out_height as f32 - 1.0),
            (0.0, self.out_height as f32 - 1.0),
        ];

        let Some(projection) = Projection::from_control_points(quad.control_points(), dst) else {
            warn!("degenerate quad, plain resize");
            return self.plain_resize(image, found_quad);
        };

        let mut out = RgbImage::new(self.out_width, self.out_height);
        warp_into(
            image,
            &projection,
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
            &mut out,
        );

        (
            out,
            NormalizeDebug {
                found_quad,
                fallback,
                out_w: self.out_width,
                out_h: self.out_height,
                quad_area_ratio: area_ratio,
            },
        )
    }

    fn plain_resize(&self, image: &RgbImage, found_quad: bool) -> (RgbImage, NormalizeDebug) {
        let out = if image.width() == 0 || image.height() == 0 {
            RgbImage::new(self.out_width, self.out_height)
        } else {
            imageops::resize(image, self.out_width, self.out_height, FilterType::Lanczos3)
        };
        (
            out,
            NormalizeDebug {
                found_quad,
                fallback: Some(Fallback::PlainResize),
                out_w: self.out_width,
                out_h: self.out_height,
                quad_area_ratio: None,
            },
        )
    }
}
