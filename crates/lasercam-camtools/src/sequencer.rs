//! Toolpath sequencing.
//!
//! Turns the segments of one operation class into machine commands. Every
//! X, Y, speed and power value is compared against the last value actually
//! emitted for that field and left unset when it would repeat. The last
//! emitted values travel through the whole run in [`MotionState`].

use crate::transform::CoordinateTransform;
use lasercam_core::{Category, Command, Point, Segment};

/// Most recently emitted machine values. All unset at the start of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionState {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub speed: Option<Category>,
    pub power: Option<Category>,
}

impl MotionState {
    /// True when the head is known to be at `p` (machine coordinates).
    pub fn is_at(&self, p: Point) -> bool {
        self.x == Some(p.x) && self.y == Some(p.y)
    }
}

/// Sequences `segments` at the given category, starting from `state`.
///
/// Gaps between consecutive segments (and between `state` and the first
/// segment) are bridged with a laser-off travel move. Returns the commands
/// and the state after the last of them.
///
/// The laser is not re-armed when `state` already has it on at `category`,
/// so a later call for the same category (the next cut pass, for example)
/// starts without a `PowerOn` unless a travel move came first.
pub fn sequence(
    segments: &[Segment],
    category: Category,
    state: MotionState,
    transform: &CoordinateTransform,
) -> (Vec<Command>, MotionState) {
    let mut seq = Sequencer {
        commands: Vec::new(),
        state,
    };

    for segment in segments {
        let start = transform.apply(segment.start);
        if !seq.state.is_at(start) {
            seq.travel_to(start);
        }
        seq.arm(category);
        seq.line_to(transform.apply(segment.end), category);
    }

    tracing::debug!(
        "Sequenced {} segments at {} into {} commands",
        segments.len(),
        category,
        seq.commands.len()
    );
    (seq.commands, seq.state)
}

struct Sequencer {
    commands: Vec<Command>,
    state: MotionState,
}

impl Sequencer {
    /// Laser off, then a travel move to `p`.
    fn travel_to(&mut self, p: Point) {
        if self.state.power != Some(Category::Move) {
            self.commands.push(Command::PowerOff {
                level: Category::Move,
            });
            self.state.power = Some(Category::Move);
        }
        let (x, y, speed) = self.changed(p, Category::Move);
        self.commands.push(Command::Move { x, y, speed });
    }

    /// Power on at `category` unless already armed at that level.
    fn arm(&mut self, category: Category) {
        if self.state.power != Some(category) {
            self.commands.push(Command::PowerOn { level: category });
            self.state.power = Some(category);
        }
    }

    fn line_to(&mut self, p: Point, category: Category) {
        let (x, y, speed) = self.changed(p, category);
        self.commands.push(Command::Line { x, y, speed });
    }

    /// Fields that differ from the last emitted values. Updates the state.
    fn changed(
        &mut self,
        p: Point,
        category: Category,
    ) -> (Option<f64>, Option<f64>, Option<Category>) {
        let x = (self.state.x != Some(p.x)).then_some(p.x);
        let y = (self.state.y != Some(p.y)).then_some(p.y);
        let speed = (self.state.speed != Some(category)).then_some(category);
        self.state.x = Some(p.x);
        self.state.y = Some(p.y);
        self.state.speed = Some(category);
        (x, y, speed)
    }
}
