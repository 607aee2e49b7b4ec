//! Rule-based output emission.
//!
//! An [`EmissionRule`] is read from a rule file made of bracketed sections:
//!
//! ```text
//! [start gcode] {*
//! G21
//! *}
//!
//! [line] {*
//! command: G1
//! X: _X{x}
//! speed: _F{speed}
//! *}
//! ```
//!
//! `start gcode` and `end gcode` hold the prologue and epilogue verbatim.
//! The `move`, `line`, `on`, `off` and `comment` sections hold
//! `subfield: template` lines. Underscores in templates render as spaces.
//! Templates use the placeholders `{x}`, `{y}`, `{speed}`, `{power}` and
//! `{text}`.

use crate::error::RuleError;
use lasercam_core::{Category, Command};
use lasercam_settings::Configuration;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\[([^\]\r\n]+)\]\s*\{\*(.*?)\*\}").expect("invalid section regex")
});

const MARLIN_RULE: &str = include_str!("../rules/marlin.ppr");
const GRBL_RULE: &str = include_str!("../rules/grbl.ppr");

/// Template slot of a rule, one per (section, subfield) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    MoveCommand,
    MoveX,
    MoveY,
    MoveSpeed,
    LineCommand,
    LineX,
    LineY,
    LineSpeed,
    OnCommand,
    OnPower,
    OffCommand,
    OffPower,
    CommentText,
}

impl Slot {
    /// Maps a section and subfield name to its slot.
    pub fn lookup(section: &str, subfield: &str) -> Option<Slot> {
        let slot = match (section, subfield.to_ascii_lowercase().as_str()) {
            ("move", "command") => Slot::MoveCommand,
            ("move", "x") => Slot::MoveX,
            ("move", "y") => Slot::MoveY,
            ("move", "speed") => Slot::MoveSpeed,
            ("line", "command") => Slot::LineCommand,
            ("line", "x") => Slot::LineX,
            ("line", "y") => Slot::LineY,
            ("line", "speed") => Slot::LineSpeed,
            ("on", "command") => Slot::OnCommand,
            ("on", "power") => Slot::OnPower,
            ("off", "command") => Slot::OffCommand,
            ("off", "power") => Slot::OffPower,
            ("comment", "text") => Slot::CommentText,
            _ => return None,
        };
        Some(slot)
    }
}

/// Parsed emission rule. Slots the rule does not define render as nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionRule {
    pub name: String,
    pub prologue: String,
    pub epilogue: String,
    templates: HashMap<Slot, String>,
}

impl EmissionRule {
    /// Parses rule text. Unknown sections and subfields are logged and
    /// skipped; text without any section is an error.
    pub fn parse(name: &str, text: &str) -> Result<Self, RuleError> {
        let mut rule = EmissionRule {
            name: name.to_string(),
            ..Default::default()
        };
        let mut sections = 0;

        for caps in SECTION_RE.captures_iter(text) {
            sections += 1;
            let section = caps[1].trim().replace('_', " ").to_ascii_lowercase();
            let content = &caps[2];

            match section.as_str() {
                "start gcode" => rule.prologue = block(content),
                "end gcode" => rule.epilogue = block(content),
                "move" | "line" | "on" | "off" | "comment" => {
                    rule.parse_fields(&section, content)
                }
                other => tracing::warn!("Rule '{}': ignoring unknown section [{}]", name, other),
            }
        }

        if sections == 0 {
            return Err(RuleError::Empty(name.to_string()));
        }
        Ok(rule)
    }

    fn parse_fields(&mut self, section: &str, content: &str) {
        for line in content.split(['\n', '\r']).filter(|l| !l.trim().is_empty()) {
            let Some((field, template)) = line.split_once(':') else {
                tracing::warn!("Rule '{}': ignoring line '{}' in [{}]", self.name, line, section);
                continue;
            };
            match Slot::lookup(section, field.trim()) {
                Some(slot) => {
                    self.templates
                        .insert(slot, template.trim().replace('_', " "));
                }
                None => tracing::warn!(
                    "Rule '{}': ignoring unknown field '{}' in [{}]",
                    self.name,
                    field.trim(),
                    section
                ),
            }
        }
    }

    /// Loads `<dir>/<name>.ppr`, falling back to the built-in rule of the
    /// same name.
    pub fn load(name: &str, dir: &Path) -> Result<Self, RuleError> {
        let path = dir.join(format!("{}.ppr", name));
        if path.is_file() {
            tracing::debug!("Loading emission rule from {}", path.display());
            let text = std::fs::read_to_string(&path)?;
            return Self::parse(name, &text);
        }

        match Self::builtin(name) {
            Some(text) => {
                tracing::debug!("Using built-in emission rule '{}'", name);
                Self::parse(name, text)
            }
            None => Err(RuleError::NotFound {
                name: name.to_string(),
                dir: dir.to_path_buf(),
            }),
        }
    }

    /// Source text of a built-in rule.
    pub fn builtin(name: &str) -> Option<&'static str> {
        match name {
            "marlin" => Some(MARLIN_RULE),
            "grbl" => Some(GRBL_RULE),
            _ => None,
        }
    }

    /// Template for a slot; empty when the rule does not define it.
    pub fn template(&self, slot: Slot) -> &str {
        self.templates.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn defines(&self, slot: Slot) -> bool {
        self.templates.contains_key(&slot)
    }
}

/// Section body with surrounding blank space removed and a final newline.
fn block(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

/// Renders a command stream with a rule.
///
/// Speed and power categories resolve to numbers from `config` here and
/// nowhere earlier. Unset command fields render as nothing. Annotations
/// render only when the rule has a comment template.
pub fn emit(commands: &[Command], config: &Configuration, rule: &EmissionRule) -> String {
    let mut out = rule.prologue.clone();

    for command in commands {
        match command {
            Command::Move { x, y, speed } => {
                let slots = (Slot::MoveCommand, Slot::MoveX, Slot::MoveY, Slot::MoveSpeed);
                push_motion(&mut out, rule, config, slots, *x, *y, *speed);
            }
            Command::Line { x, y, speed } => {
                let slots = (Slot::LineCommand, Slot::LineX, Slot::LineY, Slot::LineSpeed);
                push_motion(&mut out, rule, config, slots, *x, *y, *speed);
            }
            Command::PowerOn { level } => {
                push_power(&mut out, rule, config, Slot::OnCommand, Slot::OnPower, *level)
            }
            Command::PowerOff { level } => {
                push_power(&mut out, rule, config, Slot::OffCommand, Slot::OffPower, *level)
            }
            Command::Annotation { text } => {
                if rule.defines(Slot::CommentText) {
                    out.push_str(&rule.template(Slot::CommentText).replace("{text}", text));
                    out.push('\n');
                }
            }
        }
    }

    out.push_str(&rule.epilogue);
    out
}

fn push_motion(
    out: &mut String,
    rule: &EmissionRule,
    config: &Configuration,
    (command, x_slot, y_slot, speed_slot): (Slot, Slot, Slot, Slot),
    x: Option<f64>,
    y: Option<f64>,
    speed: Option<Category>,
) {
    out.push_str(rule.template(command));
    if let Some(x) = x {
        out.push_str(&rule.template(x_slot).replace("{x}", &x.to_string()));
    }
    if let Some(y) = y {
        out.push_str(&rule.template(y_slot).replace("{y}", &y.to_string()));
    }
    if let Some(speed) = speed {
        let value = config.speed_for(speed).to_string();
        out.push_str(&rule.template(speed_slot).replace("{speed}", &value));
    }
    out.push('\n');
}

fn push_power(
    out: &mut String,
    rule: &EmissionRule,
    config: &Configuration,
    command: Slot,
    power_slot: Slot,
    level: Category,
) {
    out.push_str(rule.template(command));
    let value = config.power_for(level).to_string();
    out.push_str(&rule.template(power_slot).replace("{power}", &value));
    out.push('\n');
}
