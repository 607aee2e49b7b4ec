//! # lasercam Core
//!
//! Core types shared by the lasercam crates:
//!
//! - **Geometry**: points, straight segments, source primitives (lines,
//!   Bézier curves, elliptical arcs) and document bounding boxes
//! - **Commands**: the abstract machine command stream produced by the
//!   toolpath sequencer and consumed by the rule-based emitter

pub mod command;
pub mod geometry;

pub use command::{Category, Command, CommandKind, OperationClass, Origin};
pub use geometry::{BoundingBox, Contour, LayerSource, Point, Primitive, Segment, SourcePath};
