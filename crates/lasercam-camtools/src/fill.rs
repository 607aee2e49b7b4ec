//! Scanline area fill.
//!
//! Vertical scan columns are intersected with the contour and the spans
//! between consecutive intersections are kept when their midpoint lies
//! inside the contour (even-odd rule). Columns alternate direction so the
//! head sweeps back and forth.

use lasercam_core::{BoundingBox, Point, Segment};
use std::cmp::Ordering;

/// Tolerance for merging shared vertices and boundary tests.
const EPSILON: f64 = 1e-9;

/// Produces vertical fill strokes at the given pitch.
///
/// Column `k` lies at `x = min_x + k * pitch`. Even columns run upward in
/// y, odd columns downward. A non-positive pitch or an empty contour yields
/// no strokes.
pub fn rasterize(contour: &[Segment], pitch: f64) -> Vec<Segment> {
    let mut strokes = Vec::new();

    if !(pitch > 0.0) {
        return strokes;
    }
    let Some(bounds) = BoundingBox::of_segments(contour) else {
        return strokes;
    };

    let num_lines = (bounds.width() / pitch).floor() as usize + 1;
    for k in 0..num_lines {
        let x = bounds.min_x + k as f64 * pitch;

        let mut hits = column_intersections(contour, x);
        if hits.len() < 2 {
            continue;
        }
        if k % 2 == 1 {
            hits.reverse();
        }

        for pair in hits.windows(2) {
            let mid = Point::new(x, (pair[0] + pair[1]) / 2.0);
            if is_inside(contour, mid) {
                strokes.push(Segment::new(Point::new(x, pair[0]), Point::new(x, pair[1])));
            }
        }
    }

    tracing::debug!(
        "Rasterized {} segments into {} strokes over {} columns",
        contour.len(),
        strokes.len(),
        num_lines
    );
    strokes
}

/// Sorted, de-duplicated y-values where the vertical line at `x` meets the
/// contour. Vertical segments are skipped.
fn column_intersections(contour: &[Segment], x: f64) -> Vec<f64> {
    let mut hits: Vec<f64> = contour
        .iter()
        .filter(|s| !s.is_vertical())
        .filter_map(|s| {
            let (a, b) = (s.start, s.end);
            let lo = a.x.min(b.x) - EPSILON;
            let hi = a.x.max(b.x) + EPSILON;
            if x < lo || x > hi {
                return None;
            }
            Some(a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x))
        })
        .collect();

    hits.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    hits.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    hits
}

/// Even-odd test with a ray cast toward +x. Points on the contour count as
/// inside.
fn is_inside(contour: &[Segment], p: Point) -> bool {
    if contour.iter().any(|s| on_segment(s, p)) {
        return true;
    }

    let crossings = contour
        .iter()
        .filter(|s| {
            let (a, b) = (s.start, s.end);
            if (a.y > p.y) == (b.y > p.y) {
                return false;
            }
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            x_cross > p.x
        })
        .count();

    crossings % 2 == 1
}

fn on_segment(s: &Segment, p: Point) -> bool {
    let (a, b) = (s.start, s.end);
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if len_sq < EPSILON * EPSILON {
        return a.distance_to(&p) < EPSILON;
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_sq;
    if !(-EPSILON..=1.0 + EPSILON).contains(&t) {
        return false;
    }
    let foot = Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    foot.distance_to(&p) < EPSILON
}
