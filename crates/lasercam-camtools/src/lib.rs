//! # lasercam CAM Tools
//!
//! Toolpath generation and code emission for laser cutters and engravers.
//!
//! ## Stages
//!
//! - **Flatten**: curve flattening and per-path contour normalization
//! - **Fill**: scanline raster fill with parity testing
//! - **Transform**: document to machine coordinate mapping
//! - **Sequencer**: continuity-aware, compacted motion command generation
//! - **Assembler**: fixed-order composition of operation classes and passes
//! - **Emitter**: rule-file driven rendering of the command stream
//!
//! ## Supporting Infrastructure
//!
//! - **SVG Document**: layer reader for labelled SVG groups
//! - **Pipeline**: document + configuration + rule to output text

pub mod assembler;
pub mod emitter;
pub mod error;
pub mod fill;
pub mod flatten;
pub mod pipeline;
pub mod sequencer;
pub mod svg_document;
mod svg_path;
pub mod transform;

// Re-export commonly used items
pub use assembler::{assemble, ProcessInput};
pub use emitter::{emit, EmissionRule, Slot};
pub use error::{CamToolError, CamToolResult, DocumentError, RuleError};
pub use fill::rasterize;
pub use flatten::{flatten_curve, normalize_path, normalize_paths};
pub use pipeline::{build_input, dump_commands, generate_commands, render, run, write_output};
pub use sequencer::{sequence, MotionState};
pub use svg_document::SvgDocument;
pub use transform::CoordinateTransform;
