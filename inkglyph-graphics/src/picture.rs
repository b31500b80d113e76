//! Picture assembly operations.
//!
//! A picture is an ordered collection of stroked objects. These helpers add
//! one primitive at a time, skipping the degenerate ones a canvas would
//! refuse to draw.

use crate::types::{
    EllipseObject, GraphicsObject, LineObject, Picture, Point, PolylineObject, Scalar,
    StrokeStyle,
};

/// Add a straight segment. Segments with a non-positive or non-finite
/// stroke width are skipped.
pub fn add_line(pic: &mut Picture, from: Point, to: Point, style: StrokeStyle) {
    if !is_drawable(style.width) || !from.is_finite() || !to.is_finite() {
        return;
    }
    pic.push(GraphicsObject::Line(LineObject { from, to, style }));
}

/// Add an axis-aligned ellipse. Non-positive radii are skipped.
pub fn add_ellipse(pic: &mut Picture, center: Point, rx: Scalar, ry: Scalar, style: StrokeStyle) {
    if !is_drawable(rx) || !is_drawable(ry) || !is_drawable(style.width) || !center.is_finite() {
        return;
    }
    pic.push(GraphicsObject::Ellipse(EllipseObject::axis_aligned(
        center, rx, ry, style,
    )));
}

/// Add an open polyline through `points`. Fewer than two points is skipped.
pub fn add_polyline(pic: &mut Picture, points: Vec<Point>, style: StrokeStyle) {
    if points.len() < 2 || !is_drawable(style.width) || points.iter().any(|p| !p.is_finite()) {
        return;
    }
    pic.push(GraphicsObject::Polyline(PolylineObject { points, style }));
}

fn is_drawable(v: Scalar) -> bool {
    v.is_finite() && v > 0.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line() {
        let mut pic = Picture::new();
        add_line(&mut pic, Point::ZERO, Point::new(10.0, 0.0), StrokeStyle::new(2.0));
        assert_eq!(pic.objects.len(), 1);
        assert!(matches!(pic.objects[0], GraphicsObject::Line(_)));
    }

    #[test]
    fn test_add_line_skips_zero_width() {
        let mut pic = Picture::new();
        add_line(&mut pic, Point::ZERO, Point::new(10.0, 0.0), StrokeStyle::new(0.0));
        assert!(pic.is_empty());
    }

    #[test]
    fn test_add_ellipse_skips_degenerate() {
        let mut pic = Picture::new();
        add_ellipse(&mut pic, Point::ZERO, 0.0, 5.0, StrokeStyle::new(1.0));
        add_ellipse(&mut pic, Point::ZERO, 4.0, -1.0, StrokeStyle::new(1.0));
        assert!(pic.is_empty());

        add_ellipse(&mut pic, Point::ZERO, 4.0, 5.0, StrokeStyle::new(1.0));
        assert!(matches!(pic.objects[0], GraphicsObject::Ellipse(_)));
    }

    #[test]
    fn test_add_polyline_needs_two_points() {
        let mut pic = Picture::new();
        add_polyline(&mut pic, vec![Point::ZERO], StrokeStyle::new(1.0));
        assert!(pic.is_empty());

        add_polyline(
            &mut pic,
            vec![Point::ZERO, Point::new(0.0, 5.0), Point::new(5.0, 5.0)],
            StrokeStyle::new(1.0),
        );
        assert_eq!(pic.objects.len(), 1);
    }

    #[test]
    fn test_add_line_skips_non_finite() {
        let mut pic = Picture::new();
        add_line(&mut pic, Point::new(Scalar::NAN, 0.0), Point::ZERO, StrokeStyle::new(1.0));
        assert!(pic.is_empty());
    }
}
