use lasercam_camtools::rasterize;
use lasercam_core::{Point, Segment};

fn square(size: f64) -> Vec<Segment> {
    let p = |x, y| Point::new(x, y);
    vec![
        Segment::new(p(0.0, 0.0), p(size, 0.0)),
        Segment::new(p(size, 0.0), p(size, size)),
        Segment::new(p(size, size), p(0.0, size)),
        Segment::new(p(0.0, size), p(0.0, 0.0)),
    ]
}

#[test]
fn test_square_spans_every_column() {
    let strokes = rasterize(&square(10.0), 1.0);

    assert_eq!(strokes.len(), 11);
    for (k, stroke) in strokes.iter().enumerate() {
        let x = k as f64;
        assert_eq!(stroke.start.x, x);
        assert_eq!(stroke.end.x, x);
        let (lo, hi) = if k % 2 == 0 {
            (stroke.start.y, stroke.end.y)
        } else {
            (stroke.end.y, stroke.start.y)
        };
        assert_eq!((lo, hi), (0.0, 10.0), "column {} does not span the square", k);
    }
}

#[test]
fn test_concave_shape_splits_column() {
    // U shape: the column through the notch has two separate spans
    let p = |x, y| Point::new(x, y);
    let outline = [
        p(0.0, 0.0),
        p(9.0, 0.0),
        p(9.0, 9.0),
        p(6.0, 9.0),
        p(6.0, 3.0),
        p(3.0, 3.0),
        p(3.0, 9.0),
        p(0.0, 9.0),
    ];
    let contour: Vec<Segment> = outline
        .iter()
        .zip(outline.iter().cycle().skip(1))
        .map(|(a, b)| Segment::new(*a, *b))
        .collect();

    let strokes = rasterize(&contour, 4.5);
    // Columns at 0, 4.5 and 9
    let notch: Vec<&Segment> = strokes.iter().filter(|s| s.start.x == 4.5).collect();
    assert_eq!(notch.len(), 1);
    let (lo, hi) = (
        notch[0].start.y.min(notch[0].end.y),
        notch[0].start.y.max(notch[0].end.y),
    );
    assert_eq!((lo, hi), (0.0, 3.0));
    assert_eq!(strokes.len(), 3);
}

#[test]
fn test_strokes_are_column_major() {
    let strokes = rasterize(&square(4.0), 0.5);
    let xs: Vec<f64> = strokes.iter().map(|s| s.start.x).collect();
    let mut sorted = xs.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, sorted);
    assert_eq!(strokes.len(), 9);
}
