//! Document to machine coordinate mapping.

use lasercam_core::{BoundingBox, Origin, Point};

/// Maps document points into the machine frame selected by an [`Origin`]
/// and rounds them to a fixed number of decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    origin: Origin,
    bounds: BoundingBox,
    precision: u32,
}

impl CoordinateTransform {
    pub fn new(origin: Origin, bounds: BoundingBox, precision: u32) -> Self {
        Self {
            origin,
            bounds,
            precision,
        }
    }

    /// Transform that only rounds.
    pub fn identity(precision: u32) -> Self {
        Self::new(Origin::Identity, BoundingBox::default(), precision)
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Maps and rounds a document point.
    pub fn apply(&self, p: Point) -> Point {
        let b = &self.bounds;
        let (x, y) = match self.origin {
            Origin::Sw => (p.x, b.max_y - p.y),
            Origin::Se => (b.max_x - p.x, b.max_y - p.y),
            Origin::Ne => (b.max_x - p.x, p.y),
            Origin::C => (p.x - b.max_x / 2.0, p.y - b.max_y / 2.0),
            Origin::Identity => (p.x, p.y),
        };
        Point::new(self.round(x), self.round(y))
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision as i32);
        let rounded = (value * factor).round() / factor;
        // Collapse -0.0 so it never renders as "-0"
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}
