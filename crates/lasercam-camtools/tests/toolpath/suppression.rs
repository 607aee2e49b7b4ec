use lasercam_camtools::{assemble, CoordinateTransform, ProcessInput};
use lasercam_core::{BoundingBox, Category, Command, OperationClass, Origin, Point, Segment};
use lasercam_settings::Configuration;
use proptest::prelude::*;

/// Segments on an integer grid; `chained` segments start where the previous
/// one ended, the others leave a gap.
fn segments() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec((0..20i32, 0..20i32, 0..20i32, 0..20i32, any::<bool>()), 0..10).prop_map(
        |raw| {
            let mut out: Vec<Segment> = Vec::new();
            for (x0, y0, x1, y1, chained) in raw {
                let start = match out.last() {
                    Some(prev) if chained => prev.end,
                    _ => Point::new(x0 as f64, y0 as f64),
                };
                out.push(Segment::new(start, Point::new(x1 as f64, y1 as f64)));
            }
            out
        },
    )
}

/// Checks that no command repeats the most recently emitted value of any
/// field.
fn assert_compacted(commands: &[Command]) -> Result<(), TestCaseError> {
    let mut x = None;
    let mut y = None;
    let mut speed = None;
    let mut power = None;

    for (i, command) in commands.iter().enumerate() {
        match command {
            Command::Move {
                x: cx,
                y: cy,
                speed: cs,
            }
            | Command::Line {
                x: cx,
                y: cy,
                speed: cs,
            } => {
                if cx.is_some() {
                    prop_assert_ne!(*cx, x, "x repeated at {}", i);
                    x = *cx;
                }
                if cy.is_some() {
                    prop_assert_ne!(*cy, y, "y repeated at {}", i);
                    y = *cy;
                }
                if cs.is_some() {
                    prop_assert_ne!(*cs, speed, "speed repeated at {}", i);
                    speed = *cs;
                }
            }
            Command::PowerOn { level } | Command::PowerOff { level } => {
                prop_assert_ne!(Some(*level), power, "power repeated at {}", i);
                power = Some(*level);
            }
            Command::Annotation { .. } => {}
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn no_field_repeats_across_a_run(
        classes in prop::collection::vec(segments(), 6),
        passes in 1u32..4,
        origin in prop::sample::select(vec![Origin::Sw, Origin::Se, Origin::Ne, Origin::C]),
    ) {
        let mut input = ProcessInput::default();
        for (class, segs) in OperationClass::ALL.into_iter().zip(classes) {
            *input.segments_mut(class) = segs;
        }
        let config = Configuration {
            cut_passes: passes,
            ..Default::default()
        };
        let transform = CoordinateTransform::new(origin, BoundingBox::new(0.0, 0.0, 20.0, 20.0), 3);

        let commands = assemble(&input, &config, &transform);
        assert_compacted(&commands)?;
    }
}

#[test]
fn test_class_change_rearms_power() {
    let mut input = ProcessInput::default();
    input.engrave_line = vec![Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0))];
    input.cut_in = vec![Segment::new(Point::new(1.0, 0.0), Point::new(2.0, 0.0))];
    let config = Configuration {
        cut_passes: 1,
        ..Default::default()
    };

    let commands = assemble(&input, &config, &CoordinateTransform::identity(3));
    let motion: Vec<&Command> = commands
        .iter()
        .filter(|c| !matches!(c, Command::Annotation { .. }))
        .collect();

    // Continuous geometry: no travel, only a new power level and speed
    assert_eq!(
        motion[4..],
        [
            &Command::PowerOn {
                level: Category::Cut
            },
            &Command::Line {
                x: Some(2.0),
                y: None,
                speed: Some(Category::Cut)
            },
        ]
    );
}
