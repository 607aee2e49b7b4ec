//! Process assembly.
//!
//! Runs the sequencer over every operation class in a fixed order and
//! wraps each class, and each cut pass, in annotations.

use crate::sequencer::{sequence, MotionState};
use crate::transform::CoordinateTransform;
use lasercam_core::{Command, OperationClass, Segment};
use lasercam_settings::Configuration;

/// Straight segments of every operation class, ready for sequencing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessInput {
    pub fill: Vec<Segment>,
    pub fill_contour: Vec<Segment>,
    pub engrave_contour: Vec<Segment>,
    pub engrave_line: Vec<Segment>,
    pub cut_in: Vec<Segment>,
    pub cut_out: Vec<Segment>,
}

impl ProcessInput {
    pub fn segments(&self, class: OperationClass) -> &[Segment] {
        match class {
            OperationClass::Fill => &self.fill,
            OperationClass::FillContour => &self.fill_contour,
            OperationClass::EngraveContour => &self.engrave_contour,
            OperationClass::EngraveLine => &self.engrave_line,
            OperationClass::CutIn => &self.cut_in,
            OperationClass::CutOut => &self.cut_out,
        }
    }

    pub fn segments_mut(&mut self, class: OperationClass) -> &mut Vec<Segment> {
        match class {
            OperationClass::Fill => &mut self.fill,
            OperationClass::FillContour => &mut self.fill_contour,
            OperationClass::EngraveContour => &mut self.engrave_contour,
            OperationClass::EngraveLine => &mut self.engrave_line,
            OperationClass::CutIn => &mut self.cut_in,
            OperationClass::CutOut => &mut self.cut_out,
        }
    }

    pub fn is_empty(&self) -> bool {
        OperationClass::ALL
            .iter()
            .all(|class| self.segments(*class).is_empty())
    }
}

/// Builds the command stream for a whole run.
///
/// Classes run in the order fill, fill-contour, engrave-contour,
/// engrave-line, cut-in, cut-out. Empty classes contribute nothing. Cut
/// classes repeat `cut_passes` times with the motion state carried from
/// one pass into the next.
pub fn assemble(
    input: &ProcessInput,
    config: &Configuration,
    transform: &CoordinateTransform,
) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut state = MotionState::default();

    for class in OperationClass::ALL {
        let segments = input.segments(class);
        if segments.is_empty() {
            continue;
        }

        let category = class.category();
        commands.push(Command::annotation(format!(
            "start {} strategy",
            class.strategy()
        )));

        if class.is_cut() {
            for pass in 1..=config.passes_for(class) {
                commands.push(Command::annotation(format!("pass {}", pass)));
                let (pass_commands, next) = sequence(segments, category, state, transform);
                commands.extend(pass_commands);
                state = next;
            }
        } else {
            let (class_commands, next) = sequence(segments, category, state, transform);
            commands.extend(class_commands);
            state = next;
        }

        commands.push(Command::annotation(format!(
            "finish {} strategy",
            class.strategy()
        )));
        tracing::debug!("Assembled {} with {} segments", class, segments.len());
    }

    commands
}
