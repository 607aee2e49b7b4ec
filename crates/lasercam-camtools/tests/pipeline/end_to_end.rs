use lasercam_camtools::{
    assemble, emit, run, CoordinateTransform, EmissionRule, ProcessInput, SvgDocument,
};
use lasercam_core::{BoundingBox, Point, Segment};
use lasercam_settings::Configuration;
use std::fs;
use tempfile::TempDir;

const SHAPE: [(f64, f64); 5] = [
    (10.0, 10.0),
    (30.0, 10.0),
    (35.0, 25.0),
    (20.0, 35.0),
    (5.0, 25.0),
];

const EXPECTED: &str = "G21\nG90\nM5\n\
M5\n\
G0 X10 Y30 F2000\n\
M3 S75\n\
G1 X30 F700\n\
G1 X35 Y15\n\
G1 X20 Y5\n\
G1 X5 Y15\n\
G1 X10 Y30\n\
M5\nG0 X0 Y0\nM84\n";

fn closed_shape() -> Vec<Segment> {
    SHAPE
        .iter()
        .zip(SHAPE.iter().cycle().skip(1))
        .map(|(&(x0, y0), &(x1, y1))| Segment::new(Point::new(x0, y0), Point::new(x1, y1)))
        .collect()
}

#[test]
fn test_fill_contour_only_with_marlin() {
    let config = Configuration::default();
    let mut input = ProcessInput::default();
    input.fill_contour = closed_shape();

    let transform = CoordinateTransform::new(
        config.origin(),
        BoundingBox::new(0.0, 0.0, 40.0, 40.0),
        config.accuracy,
    );
    let rule = EmissionRule::parse("marlin", EmissionRule::builtin("marlin").unwrap()).unwrap();

    let first = emit(&assemble(&input, &config, &transform), &config, &rule);
    let second = emit(&assemble(&input, &config, &transform), &config, &rule);

    assert_eq!(first, EXPECTED);
    assert_eq!(first, second);
    assert_eq!(first.lines().filter(|l| l.starts_with("G1")).count(), 5);
}

#[test]
fn test_svg_contour_layer_with_marlin() {
    let dir = TempDir::new().unwrap();
    let svg_path = dir.path().join("shape.svg");
    fs::write(
        &svg_path,
        r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     viewBox="0 0 40 40">
  <g inkscape:label="ec">
    <path d="M 10 10 L 30 10 L 35 25 L 20 35 L 5 25 Z"/>
  </g>
</svg>"#,
    )
    .unwrap();

    let doc = SvgDocument::from_file(&svg_path).unwrap();
    let config = Configuration {
        post_process_dir: dir.path().join("pp"),
        ..Default::default()
    };

    let first = run(&doc, &config, "marlin").unwrap();
    let second = run(&doc, &config, "marlin").unwrap();
    assert_eq!(first, EXPECTED);
    assert_eq!(first, second);
}

#[test]
fn test_grbl_renders_annotations() {
    let config = Configuration::default();
    let mut input = ProcessInput::default();
    input.cut_out = closed_shape();

    let transform = CoordinateTransform::new(
        config.origin(),
        BoundingBox::new(0.0, 0.0, 40.0, 40.0),
        config.accuracy,
    );
    let rule = EmissionRule::parse("grbl", EmissionRule::builtin("grbl").unwrap()).unwrap();
    let out = emit(&assemble(&input, &config, &transform), &config, &rule);

    assert!(out.contains("(start cut out strategy)\n(pass 1)\n"));
    assert!(out.contains("(pass 2)\n"));
    assert!(out.ends_with("(finish cut out strategy)\nM5 S0\nG0 X0 Y0\n"));
    assert_eq!(out.matches("M4 S245").count(), 1);
}
