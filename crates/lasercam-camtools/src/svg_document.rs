//! SVG layer reader.
//!
//! Collects the shapes of every `inkscape:label`-ed group. Shapes inside a
//! nested unlabelled group belong to the nearest labelled ancestor.
//! Transforms and styling are not applied.

use crate::error::DocumentError;
use crate::svg_path::{parse_path_data, parse_points};
use lasercam_core::{BoundingBox, LayerSource, Point, Primitive, SourcePath};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;

/// Labelled groups of an SVG document plus its bounding box.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    bounds: BoundingBox,
    layers: HashMap<String, Vec<SourcePath>>,
}

impl SvgDocument {
    /// Reads a document from disk.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        if !path.is_file() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let doc = Self::parse(&content)?;
        tracing::info!(
            "Loaded {} with {} labelled layers",
            path.display(),
            doc.layers.len()
        );
        tracing::debug!("Layers: {}", doc.labels().collect::<Vec<_>>().join(", "));
        Ok(doc)
    }

    /// Parses SVG text.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut bounds = None;
        let mut layers: HashMap<String, Vec<SourcePath>> = HashMap::new();
        // Effective label of each open <g>
        let mut groups: Vec<Option<String>> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let attrs = attributes(e);
                    match e.local_name().as_ref() {
                        b"svg" if bounds.is_none() => bounds = Some(document_bounds(&attrs)?),
                        b"g" => {
                            let inherited = groups.last().cloned().flatten();
                            groups.push(attrs.get("inkscape:label").cloned().or(inherited));
                        }
                        name => collect_shape(name, &attrs, &groups, &mut layers),
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let attrs = attributes(e);
                    match e.local_name().as_ref() {
                        b"svg" if bounds.is_none() => bounds = Some(document_bounds(&attrs)?),
                        name => collect_shape(name, &attrs, &groups, &mut layers),
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"g" {
                        groups.pop();
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DocumentError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    })
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            bounds: bounds.ok_or(DocumentError::MissingViewBox)?,
            layers,
        })
    }

    /// Labels of every group that holds at least one shape.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }
}

impl LayerSource for SvgDocument {
    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn layer(&self, label: &str) -> Option<&[SourcePath]> {
        self.layers.get(label).map(Vec::as_slice)
    }
}

fn attributes(e: &BytesStart) -> HashMap<String, String> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
            let value = std::str::from_utf8(&attr.value).unwrap_or("");
            (key.to_string(), value.to_string())
        })
        .collect()
}

/// Leading numeric part of a length such as `210mm` or `100.5px`.
fn length(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// Bounding box from `viewBox="min_x min_y width height"`, falling back to
/// the numeric `width` and `height` attributes.
fn document_bounds(attrs: &HashMap<String, String>) -> Result<BoundingBox, DocumentError> {
    if let Some(view_box) = attrs.get("viewBox") {
        let values: Vec<f64> = view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        if let [min_x, min_y, width, height] = values[..] {
            return Ok(BoundingBox::new(min_x, min_y, min_x + width, min_y + height));
        }
        tracing::warn!("Ignoring malformed viewBox '{}'", view_box);
    }

    let width = attrs.get("width").and_then(|w| length(w));
    let height = attrs.get("height").and_then(|h| length(h));
    match (width, height) {
        (Some(w), Some(h)) => Ok(BoundingBox::new(0.0, 0.0, w, h)),
        _ => Err(DocumentError::MissingViewBox),
    }
}

fn collect_shape(
    name: &[u8],
    attrs: &HashMap<String, String>,
    groups: &[Option<String>],
    layers: &mut HashMap<String, Vec<SourcePath>>,
) {
    let Some(Some(label)) = groups.last() else {
        return;
    };
    let Some(path) = shape_path(name, attrs) else {
        return;
    };
    if !path.is_empty() {
        layers.entry(label.clone()).or_default().push(path);
    }
}

/// Converts one shape element into a path. Returns `None` for elements
/// that are not shapes.
fn shape_path(name: &[u8], attrs: &HashMap<String, String>) -> Option<SourcePath> {
    let num = |key: &str| attrs.get(key).and_then(|v| length(v)).unwrap_or(0.0);

    let primitives = match name {
        b"path" => parse_path_data(attrs.get("d").map(String::as_str).unwrap_or("")),
        b"line" => {
            let from = Point::new(num("x1"), num("y1"));
            let to = Point::new(num("x2"), num("y2"));
            if from == to {
                Vec::new()
            } else {
                vec![Primitive::line(from, to)]
            }
        }
        b"polyline" | b"polygon" => {
            let mut points = parse_points(attrs.get("points").map(String::as_str).unwrap_or(""));
            if name == b"polygon" {
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
            }
            polyline(&points)
        }
        b"rect" => {
            let (x, y, w, h) = (num("x"), num("y"), num("width"), num("height"));
            if w <= 0.0 || h <= 0.0 {
                Vec::new()
            } else {
                polyline(&[
                    Point::new(x, y),
                    Point::new(x + w, y),
                    Point::new(x + w, y + h),
                    Point::new(x, y + h),
                    Point::new(x, y),
                ])
            }
        }
        b"circle" => {
            let r = num("r");
            if r <= 0.0 {
                Vec::new()
            } else {
                vec![Primitive::ellipse(Point::new(num("cx"), num("cy")), r, r)]
            }
        }
        b"ellipse" => {
            let (rx, ry) = (num("rx"), num("ry"));
            if rx <= 0.0 || ry <= 0.0 {
                Vec::new()
            } else {
                vec![Primitive::ellipse(Point::new(num("cx"), num("cy")), rx, ry)]
            }
        }
        _ => return None,
    };

    Some(SourcePath::new(primitives))
}

fn polyline(points: &[Point]) -> Vec<Primitive> {
    points
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .map(|pair| Primitive::line(pair[0], pair[1]))
        .collect()
}
