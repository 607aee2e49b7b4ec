//! Abstract machine command stream.
//!
//! The toolpath sequencer produces [`Command`]s; the rule-based emitter turns
//! them into controller text. Optional fields are `None` when the value is
//! unchanged from the most recently emitted value for that field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Power/speed category. Resolved to numeric values only at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Laser off, free travel
    Move,
    EngraveFill,
    EngraveContour,
    Engrave,
    Cut,
}

impl Category {
    /// Returns the tag used in configuration files and rule templates.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Move => "move",
            Category::EngraveFill => "engrave_fill",
            Category::EngraveContour => "engrave_contour",
            Category::Engrave => "engrave",
            Category::Cut => "cut",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Functional role of a group of geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationClass {
    /// Raster fill of closed shapes
    Fill,
    /// Outline of the filled shapes
    FillContour,
    EngraveContour,
    EngraveLine,
    CutIn,
    CutOut,
}

impl OperationClass {
    /// Every class in assembly order.
    pub const ALL: [OperationClass; 6] = [
        OperationClass::Fill,
        OperationClass::FillContour,
        OperationClass::EngraveContour,
        OperationClass::EngraveLine,
        OperationClass::CutIn,
        OperationClass::CutOut,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperationClass::Fill => "fill",
            OperationClass::FillContour => "fill-contour",
            OperationClass::EngraveContour => "engrave-contour",
            OperationClass::EngraveLine => "engrave-line",
            OperationClass::CutIn => "cut-in",
            OperationClass::CutOut => "cut-out",
        }
    }

    /// Power/speed category driving this class.
    pub fn category(&self) -> Category {
        match self {
            OperationClass::Fill => Category::EngraveFill,
            OperationClass::FillContour | OperationClass::EngraveContour => {
                Category::EngraveContour
            }
            OperationClass::EngraveLine => Category::Engrave,
            OperationClass::CutIn | OperationClass::CutOut => Category::Cut,
        }
    }

    /// Cut classes repeat for the configured number of passes.
    pub fn is_cut(&self) -> bool {
        matches!(self, OperationClass::CutIn | OperationClass::CutOut)
    }

    /// Human-readable strategy name used in section annotations.
    pub fn strategy(&self) -> &'static str {
        match self {
            OperationClass::Fill => "engrave fill",
            OperationClass::FillContour => "engrave fill contour",
            OperationClass::EngraveContour => "engrave contour",
            OperationClass::EngraveLine => "engrave",
            OperationClass::CutIn => "cut in",
            OperationClass::CutOut => "cut out",
        }
    }
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Machine coordinate origin convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Bottom-left corner, Y flipped
    Sw,
    /// Bottom-right corner, both axes flipped
    Se,
    /// Top-right corner, X flipped
    Ne,
    /// Document center
    C,
    /// Document coordinates unchanged
    Identity,
}

impl Origin {
    /// Parses a convention name. Unknown names fall back to [`Origin::Identity`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sw" => Origin::Sw,
            "se" => Origin::Se,
            "ne" => Origin::Ne,
            "c" => Origin::C,
            other => {
                tracing::debug!("Origin '{}' not recognised, using identity", other);
                Origin::Identity
            }
        }
    }
}

/// Kind of a [`Command`], used to select emission templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Move,
    Line,
    PowerOn,
    PowerOff,
    Annotation,
}

/// A single abstract machine command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Laser off, travel
    Move {
        x: Option<f64>,
        y: Option<f64>,
        speed: Option<Category>,
    },
    /// Laser on, cutting/engraving motion
    Line {
        x: Option<f64>,
        y: Option<f64>,
        speed: Option<Category>,
    },
    PowerOn { level: Category },
    PowerOff { level: Category },
    /// Non-machine marker for pass/section boundaries
    Annotation { text: String },
}

impl Command {
    pub fn annotation(text: impl Into<String>) -> Self {
        Command::Annotation { text: text.into() }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Move { .. } => CommandKind::Move,
            Command::Line { .. } => CommandKind::Line,
            Command::PowerOn { .. } => CommandKind::PowerOn,
            Command::PowerOff { .. } => CommandKind::PowerOff,
            Command::Annotation { .. } => CommandKind::Annotation,
        }
    }
}
