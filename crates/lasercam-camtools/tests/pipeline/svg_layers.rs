use lasercam_camtools::{build_input, DocumentError, SvgDocument};
use lasercam_core::LayerSource;
use lasercam_settings::Configuration;
use std::fs;
use tempfile::TempDir;

const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     width="100mm" height="50mm" viewBox="0 0 100 50">
  <g inkscape:label="ef" inkscape:groupmode="layer">
    <rect x="10" y="10" width="4" height="2"/>
  </g>
  <g inkscape:label="e" inkscape:groupmode="layer">
    <polyline points="0,0 10,0 10,10"/>
    <line x1="50" y1="5" x2="60" y2="5"/>
  </g>
  <g inkscape:label="ci" inkscape:groupmode="layer">
    <circle cx="70" cy="25" r="5"/>
  </g>
  <g inkscape:label="co" inkscape:groupmode="layer">
    <ellipse cx="50" cy="25" rx="45" ry="20"/>
  </g>
</svg>"#;

#[test]
fn test_missing_document() {
    let dir = TempDir::new().unwrap();
    let result = SvgDocument::from_file(&dir.path().join("absent.svg"));
    assert!(matches!(result, Err(DocumentError::NotFound(_))));
}

#[test]
fn test_malformed_document() {
    let result = SvgDocument::parse(r#"<svg viewBox="0 0 1 1"><g></svg>"#);
    assert!(matches!(result, Err(DocumentError::Xml { .. })));
}

#[test]
fn test_layers_to_process_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.svg");
    fs::write(&path, DOC).unwrap();

    let doc = SvgDocument::from_file(&path).unwrap();
    assert_eq!(doc.bounding_box().max_x, 100.0);
    assert!(doc.layer("ec").is_none());

    let config = Configuration::default();
    let input = build_input(&doc, &config);

    // 4 x 2 rect at pitch 0.5: 9 columns
    assert_eq!(input.fill.len(), 9);
    assert_eq!(input.fill_contour.len(), 4);
    assert!(input.engrave_contour.is_empty());
    assert_eq!(input.engrave_line.len(), 3);

    // Circles flatten into chords no longer than the curve segment length
    assert!(input.cut_in.len() >= 32);
    assert!(input
        .cut_in
        .iter()
        .all(|s| s.length() <= config.curve_segment_length * 1.001));
    assert!(input.cut_out.len() > input.cut_in.len());
}

#[test]
fn test_custom_layer_labels() {
    let config = Configuration {
        engrave_contour_layer: "e".to_string(),
        engrave_layer: "none".to_string(),
        ..Default::default()
    };
    let doc = SvgDocument::parse(DOC).unwrap();
    let input = build_input(&doc, &config);

    assert_eq!(input.engrave_contour.len(), 3);
    assert!(input.engrave_line.is_empty());
}
