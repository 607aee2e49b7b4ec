use lasercam_camtools::{assemble, CoordinateTransform, ProcessInput};
use lasercam_core::{Category, Command, CommandKind, Point, Segment};
use lasercam_settings::Configuration;

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::new(Point::new(x0, y0), Point::new(x1, y1))
}

fn position_of(commands: &[Command], text: &str) -> usize {
    commands
        .iter()
        .position(|c| *c == Command::annotation(text))
        .unwrap_or_else(|| panic!("missing annotation '{}'", text))
}

#[test]
fn test_two_passes_of_closed_contour() {
    let mut input = ProcessInput::default();
    input.cut_in = vec![
        seg(0.0, 0.0, 4.0, 0.0),
        seg(4.0, 0.0, 4.0, 4.0),
        seg(4.0, 4.0, 0.0, 0.0),
    ];
    let config = Configuration::default();
    assert_eq!(config.cut_passes, 2);

    let commands = assemble(&input, &config, &CoordinateTransform::identity(3));

    let first = position_of(&commands, "pass 1");
    let second = position_of(&commands, "pass 2");
    assert!(first < second);
    assert_eq!(commands[0], Command::annotation("start cut in strategy"));
    assert_eq!(
        commands.last(),
        Some(&Command::annotation("finish cut in strategy"))
    );

    // Pass 2 starts where pass 1 ended: no travel and no re-arm
    let pass_two: Vec<CommandKind> = commands[second + 1..commands.len() - 1]
        .iter()
        .map(Command::kind)
        .collect();
    assert_eq!(pass_two, vec![CommandKind::Line; 3]);
}

#[test]
fn test_two_passes_of_open_segment() {
    let mut input = ProcessInput::default();
    input.cut_out = vec![seg(0.0, 0.0, 5.0, 0.0)];

    let commands = assemble(
        &input,
        &Configuration::default(),
        &CoordinateTransform::identity(3),
    );

    let second = position_of(&commands, "pass 2");
    // Back to the start before the second pass
    assert_eq!(
        commands[second + 1..commands.len() - 1],
        [
            Command::PowerOff {
                level: Category::Move
            },
            Command::Move {
                x: Some(0.0),
                y: None,
                speed: Some(Category::Move)
            },
            Command::PowerOn {
                level: Category::Cut
            },
            Command::Line {
                x: Some(5.0),
                y: None,
                speed: Some(Category::Cut)
            },
        ]
    );
}

#[test]
fn test_pass_count_follows_configuration() {
    let mut input = ProcessInput::default();
    input.cut_out = vec![seg(0.0, 0.0, 1.0, 1.0)];
    let config = Configuration {
        cut_passes: 4,
        ..Default::default()
    };

    let commands = assemble(&input, &config, &CoordinateTransform::identity(3));
    let passes = commands
        .iter()
        .filter(|c| matches!(c, Command::Annotation { text } if text.starts_with("pass ")))
        .count();
    assert_eq!(passes, 4);
}
