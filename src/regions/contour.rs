//! Adaptive contour proposals inside the catch-all region.
//!
//! Set icons are compact, roughly square glyphs printed darker than their
//! surround. Inverse adaptive thresholding followed by contour filtering
//! isolates icon-sized blobs; everything speck-like, elongated or sparse is
//! rejected before padding and ranking.

use image::imageops;
use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours_with_threshold, BorderType};
use imageproc::filter::{box_filter, gaussian_blur_f32};
use tracing::debug;

use crate::geometry::{bounding_box, polygon_area};

/// Local-mean window radius (31px block).
const BLOCK_RADIUS: u32 = 15;

/// Offset below the local mean a pixel must fall to count as foreground.
const MEAN_OFFSET: i16 = 5;

/// Blur applied before thresholding.
const BLUR_SIGMA: f32 = 0.8;

/// Bounding-box pixel area accepted as icon-sized.
const MIN_BLOB_AREA: i32 = 250;
const MAX_BLOB_AREA: i32 = 25_000;

/// Minimum bounding-box side length.
const MIN_SIDE: i32 = 12;

/// Width/height band for near-square icons.
const MIN_ASPECT: f32 = 0.4;
const MAX_ASPECT: f32 = 2.2;

/// Contour area over bounding-box area; rejects sparse/degenerate contours.
const MIN_FILL_RATIO: f64 = 0.20;

/// Margin added around each surviving box.
const PAD: i32 = 8;

/// An accepted proposal: absolute box `(x, y, w, h)` plus its crop.
pub(crate) struct ContourProposal {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub image: RgbImage,
}

/// Inverse adaptive threshold: foreground where a pixel sits more than
/// `MEAN_OFFSET` below its local mean.
fn adaptive_threshold_inv(gray: &GrayImage) -> GrayImage {
    let mean = box_filter(gray, BLOCK_RADIUS, BLOCK_RADIUS);
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y)[0] as i16;
        let local_mean = mean.get_pixel(x, y)[0] as i16;
        if pixel < local_mean - MEAN_OFFSET {
            image::Luma([255u8])
        } else {
            image::Luma([0u8])
        }
    })
}

/// Extracts icon-sized blob proposals from `roi`, returning boxes in
/// absolute coordinates (`origin` is the ROI's offset within the canonical
/// image), sorted by bounding-box area descending.
pub(crate) fn contour_proposals(roi: &RgbImage, origin: (u32, u32)) -> Vec<ContourProposal> {
    let (roi_w, roi_h) = roi.dimensions();
    if roi_w == 0 || roi_h == 0 {
        return Vec::new();
    }

    let gray = imageops::grayscale(roi);
    let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
    let thresholded = adaptive_threshold_inv(&blurred);

    let contours = find_contours_with_threshold::<i32>(&thresholded, 0);

    let mut accepted: Vec<(i32, ContourProposal)> = Vec::new();
    for contour in contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
    {
        let Some((x, y, w, h)) = bounding_box(&contour.points) else {
            continue;
        };

        let area = w * h;
        if !(MIN_BLOB_AREA..=MAX_BLOB_AREA).contains(&area) {
            continue;
        }
        if w < MIN_SIDE || h < MIN_SIDE {
            continue;
        }
        let aspect = w as f32 / h as f32;
        if !(MIN_ASPECT..=MAX_ASPECT).contains(&aspect) {
            continue;
        }
        let fill = polygon_area(&contour.points).abs() / area as f64;
        if fill < MIN_FILL_RATIO {
            continue;
        }

        let x0 = (x - PAD).max(0) as u32;
        let y0 = (y - PAD).max(0) as u32;
        let x1 = ((x + w + PAD) as u32).min(roi_w);
        let y1 = ((y + h + PAD) as u32).min(roi_h);

        let crop = imageops::crop_imm(roi, x0, y0, x1 - x0, y1 - y0).to_image();
        accepted.push((
            area,
            ContourProposal {
                x: origin.0 + x0,
                y: origin.1 + y0,
                w: x1 - x0,
                h: y1 - y0,
                image: crop,
            },
        ));
    }

    accepted.sort_by(|a, b| b.0.cmp(&a.0));
    debug!(proposals = accepted.len(), "contour proposals accepted");
    accepted.into_iter().map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn roi_with_dark_blob(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> RgbImage {
        let mut roi = RgbImage::from_pixel(w, h, Rgb([220, 220, 220]));
        for y in y0..y1 {
            for x in x0..x1 {
                roi.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }
        roi
    }

    #[test]
    fn test_icon_sized_blob_accepted() {
        let roi = roi_with_dark_blob(200, 200, 50, 50, 100, 100);

        let proposals = contour_proposals(&roi, (0, 0));

        assert!(!proposals.is_empty());
        let top = &proposals[0];
        assert!(top.w > 0 && top.h > 0);
        // Padded box still contains the blob.
        assert!(top.x <= 50 && top.x + top.w >= 100);
    }

    #[test]
    fn test_elongated_blob_rejected() {
        // 200x10 aspect ratio 20, far outside the near-square band.
        let roi = roi_with_dark_blob(240, 120, 20, 50, 220, 60);

        let proposals = contour_proposals(&roi, (0, 0));

        assert!(proposals.is_empty());
    }

    #[test]
    fn test_speck_rejected() {
        // 5x5 blob, area 25, below the floor.
        let roi = roi_with_dark_blob(200, 200, 90, 90, 95, 95);

        let proposals = contour_proposals(&roi, (0, 0));

        assert!(proposals.is_empty());
    }

    #[test]
    fn test_origin_offsets_boxes() {
        let roi = roi_with_dark_blob(200, 200, 50, 50, 100, 100);

        let at_origin = contour_proposals(&roi, (0, 0));
        let offset = contour_proposals(&roi, (600, 900));

        assert_eq!(at_origin.len(), offset.len());
        assert_eq!(offset[0].x, at_origin[0].x + 600);
        assert_eq!(offset[0].y, at_origin[0].y + 900);
    }

    #[test]
    fn test_blank_roi_yields_nothing() {
        let roi = RgbImage::from_pixel(150, 150, Rgb([128, 128, 128]));
        assert!(contour_proposals(&roi, (0, 0)).is_empty());
    }

    #[test]
    fn test_empty_roi_is_total() {
        let roi = RgbImage::new(0, 0);
        assert!(contour_proposals(&roi, (0, 0)).is_empty());
    }
}
