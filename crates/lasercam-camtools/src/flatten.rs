//! Curve flattening and contour normalization.
//!
//! Curves are sampled uniformly in their native parameter, not in arc
//! length, so tightly curved regions get shorter segments.

use lasercam_core::{Contour, Primitive, Segment, SourcePath};

/// Replaces a curved primitive by a polyline.
///
/// The parameter domain is split into `max(1, ceil(length / chord))` equal
/// steps. The first and last points are the primitive's exact endpoints.
/// Zero-length primitives and non-positive chords yield an empty contour.
pub fn flatten_curve(primitive: &Primitive, chord: f64) -> Contour {
    if !(chord > 0.0) {
        return Vec::new();
    }
    let length = primitive.length();
    if !(length > 0.0) || !length.is_finite() {
        tracing::trace!("Dropping degenerate primitive of length {}", length);
        return Vec::new();
    }

    let steps = ((length / chord).ceil() as usize).max(1);
    let from = primitive.from();
    let to = primitive.to();

    let mut segments = Vec::with_capacity(steps);
    let mut prev = from;
    for i in 1..=steps {
        let next = if i == steps {
            to
        } else {
            primitive.sample(i as f64 / steps as f64)
        };
        segments.push(Segment::new(prev, next));
        prev = next;
    }
    segments
}

/// Flattens one path: lines pass through, curves are spliced in place.
pub fn normalize_path(path: &SourcePath, chord: f64) -> Contour {
    let mut contour = Vec::new();
    for primitive in &path.primitives {
        match primitive {
            Primitive::Line(segment) => contour.push(*segment),
            curve => contour.extend(flatten_curve(curve, chord)),
        }
    }
    contour
}

/// Flattens every path of a group into one segment list, in document order.
pub fn normalize_paths(paths: &[SourcePath], chord: f64) -> Vec<Segment> {
    paths
        .iter()
        .flat_map(|path| normalize_path(path, chord))
        .collect()
}
