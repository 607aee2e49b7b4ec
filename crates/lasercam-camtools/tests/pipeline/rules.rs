use lasercam_camtools::{emit, EmissionRule, RuleError, Slot};
use lasercam_core::{Category, Command};
use lasercam_settings::Configuration;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_rule_file_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("marlin.ppr"),
        "[start gcode] {*\n; custom\n*}\n[line] {*\ncommand: G1\nX: _X{x}\n*}\n",
    )
    .unwrap();

    let rule = EmissionRule::load("marlin", dir.path()).unwrap();
    assert_eq!(rule.prologue, "; custom\n");
    assert_eq!(rule.template(Slot::LineY), "");
}

#[test]
fn test_builtin_used_when_file_missing() {
    let dir = TempDir::new().unwrap();
    let rule = EmissionRule::load("grbl", dir.path()).unwrap();
    assert_eq!(rule.name, "grbl");
    assert!(rule.defines(Slot::CommentText));
}

#[test]
fn test_unknown_rule_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = EmissionRule::load("ruida", dir.path()).unwrap_err();
    assert!(matches!(err, RuleError::NotFound { ref name, .. } if name == "ruida"));
}

#[test]
fn test_rule_without_sections_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blank.ppr"), "# nothing here\n").unwrap();
    let err = EmissionRule::load("blank", dir.path()).unwrap_err();
    assert!(matches!(err, RuleError::Empty(_)));
}

#[test]
fn test_omitted_fields_render_nothing() {
    let rule = EmissionRule::parse(
        "x-only",
        "[move] {*\ncommand: G0\nX: _X{x}\n*}\n[off] {*\ncommand: M5\n*}",
    )
    .unwrap();
    let config = Configuration::default();
    let commands = [
        Command::PowerOff {
            level: Category::Move,
        },
        Command::Move {
            x: Some(2.5),
            y: Some(7.0),
            speed: Some(Category::Move),
        },
        Command::PowerOn {
            level: Category::Cut,
        },
    ];

    // No on section: the power-on line is blank
    assert_eq!(emit(&commands, &config, &rule), "M5\nG0 X2.5\n\n");
}

#[test]
fn test_category_values_resolved_from_configuration() {
    let rule = EmissionRule::parse("p", "[on] {*\ncommand: M3\npower: _S{power}\n*}").unwrap();
    let config = Configuration {
        power_engrave_fill: 40.0,
        ..Default::default()
    };
    let out = emit(
        &[Command::PowerOn {
            level: Category::EngraveFill,
        }],
        &config,
        &rule,
    );
    assert_eq!(out, "M3 S40\n");
}
