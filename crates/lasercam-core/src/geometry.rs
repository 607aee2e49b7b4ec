//! Geometry primitives for toolpath generation.
//!
//! Source documents describe paths as sequences of [`Primitive`]s (lines,
//! quadratic and cubic Bézier curves, elliptical arcs). Everything downstream
//! of the contour normalizer works on straight [`Segment`]s only.

use lyon::geom::{
    point as lpoint, vector, Angle, Arc, ArcFlags, CubicBezierSegment, QuadraticBezierSegment,
    SvgArc,
};
use serde::{Deserialize, Serialize};

/// Number of parametric steps used to estimate the length of a curve.
const LENGTH_SAMPLES: usize = 64;

/// A 2D point in document units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl From<lyon::geom::Point<f64>> for Point {
    fn from(p: lyon::geom::Point<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for lyon::geom::Point<f64> {
    fn from(p: Point) -> Self {
        lpoint(p.x, p.y)
    }
}

/// A straight segment. Curvature is always eliminated before a segment exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// True when the segment runs parallel to the Y axis.
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }
}

/// Ordered straight segments of one source path. May be open, closed, or
/// contain gaps between subpaths.
pub type Contour = Vec<Segment>;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounding box of every segment endpoint, or `None` for an empty contour.
    pub fn of_segments(segments: &[Segment]) -> Option<Self> {
        let mut points = segments.iter().flat_map(|s| [s.start, s.end]);
        let first = points.next()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points.fold(init, |b, p| {
            Self::new(
                b.min_x.min(p.x),
                b.min_y.min(p.y),
                b.max_x.max(p.x),
                b.max_y.max(p.y),
            )
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A single path element as read from the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(Segment),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    /// Elliptical arc with its exact endpoints kept alongside the center
    /// parameterization.
    Arc {
        arc: Arc<f64>,
        from: Point,
        to: Point,
    },
}

impl Primitive {
    pub fn line(from: Point, to: Point) -> Self {
        Primitive::Line(Segment::new(from, to))
    }

    pub fn quadratic(from: Point, ctrl: Point, to: Point) -> Self {
        Primitive::Quadratic(QuadraticBezierSegment {
            from: from.into(),
            ctrl: ctrl.into(),
            to: to.into(),
        })
    }

    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Primitive::Cubic(CubicBezierSegment {
            from: from.into(),
            ctrl1: ctrl1.into(),
            ctrl2: ctrl2.into(),
            to: to.into(),
        })
    }

    /// Builds an arc from SVG endpoint parameters. Arcs with a zero radius
    /// or coincident endpoints degrade to a straight line.
    pub fn svg_arc(
        from: Point,
        to: Point,
        rx: f64,
        ry: f64,
        x_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
    ) -> Self {
        let svg_arc = SvgArc {
            from: from.into(),
            to: to.into(),
            radii: vector(rx.abs(), ry.abs()),
            x_rotation: Angle::degrees(x_rotation_deg),
            flags: ArcFlags { large_arc, sweep },
        };
        if svg_arc.is_straight_line() {
            return Primitive::line(from, to);
        }
        Primitive::Arc {
            arc: svg_arc.to_arc(),
            from,
            to,
        }
    }

    /// Full ellipse (or circle) as a single arc sweeping 360 degrees,
    /// starting and ending at the rightmost point.
    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        let start = Point::new(center.x + rx, center.y);
        Primitive::Arc {
            arc: Arc {
                center: center.into(),
                radii: vector(rx, ry),
                start_angle: Angle::radians(0.0),
                sweep_angle: Angle::radians(std::f64::consts::TAU),
                x_rotation: Angle::radians(0.0),
            },
            from: start,
            to: start,
        }
    }

    pub fn from(&self) -> Point {
        match self {
            Primitive::Line(s) => s.start,
            Primitive::Quadratic(q) => q.from.into(),
            Primitive::Cubic(c) => c.from.into(),
            Primitive::Arc { from, .. } => *from,
        }
    }

    pub fn to(&self) -> Point {
        match self {
            Primitive::Line(s) => s.end,
            Primitive::Quadratic(q) => q.to.into(),
            Primitive::Cubic(c) => c.to.into(),
            Primitive::Arc { to, .. } => *to,
        }
    }

    /// Point at parameter `t` in `[0, 1]` of the primitive's native domain.
    pub fn sample(&self, t: f64) -> Point {
        match self {
            Primitive::Line(s) => Point::new(
                s.start.x + (s.end.x - s.start.x) * t,
                s.start.y + (s.end.y - s.start.y) * t,
            ),
            Primitive::Quadratic(q) => q.sample(t).into(),
            Primitive::Cubic(c) => c.sample(t).into(),
            Primitive::Arc { arc, .. } => arc.sample(t).into(),
        }
    }

    /// Length of the primitive. Exact for lines, estimated from a dense
    /// parametric polyline for curves.
    pub fn length(&self) -> f64 {
        if let Primitive::Line(s) = self {
            return s.length();
        }
        let mut total = 0.0;
        let mut prev = self.sample(0.0);
        for i in 1..=LENGTH_SAMPLES {
            let p = self.sample(i as f64 / LENGTH_SAMPLES as f64);
            total += prev.distance_to(&p);
            prev = p;
        }
        total
    }
}

/// Ordered primitives of one document element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourcePath {
    pub primitives: Vec<Primitive>,
}

impl SourcePath {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Source of labelled path groups: the document collaborator of the
/// pipeline.
pub trait LayerSource {
    /// Bounding box of the whole document (used by the origin transform).
    fn bounding_box(&self) -> BoundingBox;

    /// Paths of the group with the given label, or `None` when the document
    /// has no such group.
    fn layer(&self, label: &str) -> Option<&[SourcePath]>;
}
