use image::{Rgb, RgbImage};

use super::{Fallback, PerspectiveNormalizer};

/// Black image with a bright axis-aligned rectangle, card-against-dark-table
/// style.
fn image_with_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> RgbImage {
    let mut img = RgbImage::new(w, h);
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    img
}

#[test]
fn test_card_shaped_input_takes_fast_path() {
    // 372x520 has aspect ~0.715, inside the card band.
    let img = RgbImage::from_fn(372, 520, |x, y| Rgb([(x % 251) as u8, (y % 241) as u8, 128]));
    let normalizer = PerspectiveNormalizer::new();

    let (out, debug) = normalizer.normalize(&img);

    assert_eq!(out.dimensions(), (744, 1040));
    assert_eq!(debug.fallback, Some(Fallback::DirectResize));
    assert!(!debug.found_quad);
    assert!(debug.quad_area_ratio.is_none());
}

#[test]
fn test_fast_path_band_edges() {
    let normalizer = PerspectiveNormalizer::new();

    // Exactly at the band edges: 0.65 and 0.80.
    let (_, debug) = normalizer.normalize(&RgbImage::new(65, 100));
    assert_eq!(debug.fallback, Some(Fallback::DirectResize));

    let (_, debug) = normalizer.normalize(&RgbImage::new(80, 100));
    assert_eq!(debug.fallback, Some(Fallback::DirectResize));
}

#[test]
fn test_custom_output_size() {
    let img = RgbImage::from_pixel(372, 520, Rgb([40, 40, 40]));
    let normalizer = PerspectiveNormalizer::with_output_size(300, 400);

    let (out, debug) = normalizer.normalize(&img);

    assert_eq!(out.dimensions(), (300, 400));
    assert_eq!(debug.out_w, 300);
    assert_eq!(debug.out_h, 400);
}

#[test]
fn test_clear_rectangle_produces_quad() {
    let img = image_with_rect(600, 400, 100, 50, 500, 350);
    let normalizer = PerspectiveNormalizer::new();

    let (out, debug) = normalizer.normalize(&img);

    assert_eq!(out.dimensions(), (744, 1040));
    assert!(debug.found_quad);
    assert_eq!(debug.fallback, None);
    let ratio = debug.quad_area_ratio.expect("gated path records area ratio");
    assert!(ratio > 0.1 && ratio <= 1.0, "ratio {} out of range", ratio);
}

#[test]
fn test_uniform_image_falls_back_to_plain_resize() {
    // No edges anywhere; quad detection has nothing to work with.
    let img = RgbImage::from_pixel(640, 300, Rgb([120, 120, 120]));
    let normalizer = PerspectiveNormalizer::new();

    let (out, debug) = normalizer.normalize(&img);

    assert_eq!(out.dimensions(), (744, 1040));
    assert!(!debug.found_quad);
    assert_eq!(debug.fallback, Some(Fallback::PlainResize));
}

#[test]
fn test_large_input_normalizes() {
    let img = image_with_rect(3000, 2000, 200, 200, 2800, 1800);
    let normalizer = PerspectiveNormalizer::new();

    let (out, _) = normalizer.normalize(&img);

    assert_eq!(out.dimensions(), (744, 1040));
}

#[test]
fn test_small_input_normalizes() {
    let img = image_with_rect(100, 60, 10, 10, 90, 50);
    let normalizer = PerspectiveNormalizer::new();

    let (out, _) = normalizer.normalize(&img);

    assert_eq!(out.dimensions(), (744, 1040));
}

#[test]
fn test_warp_preserves_content() {
    let mut img = RgbImage::new(600, 450);
    for y in 100..400 {
        for x in 75..375 {
            img.put_pixel(x, y, Rgb([((x - 75) % 256) as u8, ((y - 100) % 256) as u8, 128]));
        }
    }
    let normalizer = PerspectiveNormalizer::new();

    let (out, _) = normalizer.normalize(&img);

    // The warped card interior carried a gradient; output must not be uniform.
    let mean: f64 = out.pixels().map(|p| p[0] as f64).sum::<f64>() / (744.0 * 1040.0);
    let var: f64 = out
        .pixels()
        .map(|p| (p[0] as f64 - mean).powi(2))
        .sum::<f64>()
        / (744.0 * 1040.0);
    assert!(var.sqrt() > 10.0, "output looks uniform (std {})", var.sqrt());
}

#[test]
fn test_zero_sized_input_is_total() {
    let normalizer = PerspectiveNormalizer::new();
    let (out, debug) = normalizer.normalize(&RgbImage::new(0, 0));

    assert_eq!(out.dimensions(), (744, 1040));
    assert_eq!(debug.fallback, Some(Fallback::PlainResize));
}
