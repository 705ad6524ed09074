//! Planar geometry helpers for quad detection and contour filtering.


use imageproc::point::Point;

/// A quadrilateral with corners in canonical order:
/// top-left, top-right, bottom-right, bottom-left.
///
/// Construct via [`Quad::from_unordered`] so the ordering invariant holds
/// regardless of the order contour detection produced the corners in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Top-left corner.
    pub tl: (f32, f32),
    /// Top-right corner.
    pub tr: (f32, f32),
    /// Bottom-right corner.
    pub br: (f32, f32),
    /// Bottom-left corner.
    pub bl: (f32, f32),
}

impl Quad {
    /// Canonically orders four corners.
    ///
    /// Top-left has the minimum coordinate sum, bottom-right the maximum;
    /// top-right has the minimum y-x difference, bottom-left the maximum.
    /// The result is a pure function of the coordinates, invariant under
    /// any relabeling of the input points.
    pub fn from_unordered(pts: [(f32, f32); 4]) -> Quad {
        let sum = |p: (f32, f32)| p.0 + p.1;
        let diff = |p: (f32, f32)| p.1 - p.0;

        let tl = pts
            .iter()
            .copied()
            .min_by(|a, b| sum(*a).total_cmp(&sum(*b)))
            .unwrap_or(pts[0]);
        let br = pts
            .iter()
            .copied()
            .max_by(|a, b| sum(*a).total_cmp(&sum(*b)))
            .unwrap_or(pts[0]);
        let tr = pts
            .iter()
            .copied()
            .min_by(|a, b| diff(*a).total_cmp(&diff(*b)))
            .unwrap_or(pts[0]);
        let bl = pts
            .iter()
            .copied()
            .max_by(|a, b| diff(*a).total_cmp(&diff(*b)))
            .unwrap_or(pts[0]);

        Quad { tl, tr, br, bl }
    }

    /// Scales every corner by `factor` (used to map working-image
    /// coordinates back to full-resolution coordinates).
    pub fn scaled(&self, factor: f32) -> Quad {
        let s = |p: (f32, f32)| (p.0 * factor, p.1 * factor);
        Quad {
            tl: s(self.tl),
            tr: s(self.tr),
            br: s(self.br),
            bl: s(self.bl),
        }
    }

    /// Corners as projection control points, canonical order.
    pub fn control_points(&self) -> [(f32, f32); 4] {
        [self.tl, self.tr, self.br, self.bl]
    }
}

/// Signed shoelace area of a closed polygon, in pixels squared.
///
/// The absolute value is the enclosed area; contour winding direction
/// determines the sign.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0i64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        acc += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    acc as f64 / 2.0
}

/// Axis-aligned bounding box of a point set as `(x, y, w, h)`.
///
/// Returns `None` for an empty set. Width and height count pixels
/// inclusively, matching contour point semantics.
pub fn bounding_box(points: &[Point<i32>]) -> Option<(i32, i32, i32, i32)> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
