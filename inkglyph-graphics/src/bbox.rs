//! Axis-aligned bounding box computation.
//!
//! Provides [`BoundingBox`] and helpers for computing bounds of picture
//! objects and whole pictures.

use crate::types::{GraphicsObject, Picture, Point, Scalar};

// ---------------------------------------------------------------------------
// BoundingBox type
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// An empty (inverted) bounding box.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Bounding box of a set of points.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut bb, p| {
            bb.include_point(p);
            bb
        })
    }

    /// Check if this bounding box is valid (non-empty).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// Centre point, or the origin for an empty box.
    #[must_use]
    pub fn center(&self) -> Point {
        if self.is_valid() {
            Point::new(
                (self.min_x + self.max_x) / 2.0,
                (self.min_y + self.max_y) / 2.0,
            )
        } else {
            Point::ZERO
        }
    }

    /// Expand to include a point.
    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another bounding box.
    pub fn union(&mut self, other: &Self) {
        if other.is_valid() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }

    /// Grow every side by `amount`.
    #[must_use]
    pub fn inflated(&self, amount: Scalar) -> Self {
        if !self.is_valid() {
            return *self;
        }
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Bounding box computation helpers
// ---------------------------------------------------------------------------

/// Bounding box of an object's centre line, ignoring stroke width.
///
/// Degenerate ellipses contribute nothing, matching the renderer which
/// skips them.
#[must_use]
pub fn object_bbox(obj: &GraphicsObject) -> BoundingBox {
    match obj {
        GraphicsObject::Line(line) => BoundingBox::from_points([line.from, line.to]),
        GraphicsObject::Ellipse(ellipse) => {
            if ellipse.is_degenerate() {
                return BoundingBox::EMPTY;
            }
            let c = ellipse.center();
            let ext = ellipse.half_extents();
            BoundingBox {
                min_x: c.x - ext.x,
                min_y: c.y - ext.y,
                max_x: c.x + ext.x,
                max_y: c.y + ext.y,
            }
        }
        GraphicsObject::Polyline(poly) => BoundingBox::from_points(poly.points.iter().copied()),
    }
}

/// Compute the bounding box of a picture.
///
/// When `include_strokes` is true each object's box is grown by half its
/// stroke width (a conservative estimate for square caps and miters).
#[must_use]
pub fn picture_bbox(pic: &Picture, include_strokes: bool) -> BoundingBox {
    pic.objects.iter().fold(BoundingBox::EMPTY, |mut bb, obj| {
        let mut obb = object_bbox(obj);
        if include_strokes {
            obb = obb.inflated(obj.style().width / 2.0);
        }
        bb.union(&obb);
        bb
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{EllipseObject, LineObject, PolylineObject, StrokeStyle, EPSILON};

    fn line(x1: Scalar, y1: Scalar, x2: Scalar, y2: Scalar, w: Scalar) -> GraphicsObject {
        GraphicsObject::Line(LineObject {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            style: StrokeStyle::new(w),
        })
    }

    #[test]
    fn test_bounding_box_empty() {
        let bb = BoundingBox::EMPTY;
        assert!(!bb.is_valid());
        assert_eq!(bb.width(), 0.0);
        assert_eq!(bb.height(), 0.0);
        assert_eq!(bb.center(), Point::ZERO);
    }

    #[test]
    fn test_bounding_box_include_point() {
        let mut bb = BoundingBox::EMPTY;
        bb.include_point(Point::new(1.0, 2.0));
        bb.include_point(Point::new(5.0, 8.0));
        assert!(bb.is_valid());
        assert!((bb.min_x - 1.0).abs() < EPSILON);
        assert!((bb.min_y - 2.0).abs() < EPSILON);
        assert!((bb.max_x - 5.0).abs() < EPSILON);
        assert!((bb.max_y - 8.0).abs() < EPSILON);
        assert_eq!(bb.center(), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_bounding_box_union() {
        let mut bb1 = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 5.0,
            max_y: 5.0,
        };
        let bb2 = BoundingBox {
            min_x: 3.0,
            min_y: 3.0,
            max_x: 10.0,
            max_y: 10.0,
        };
        bb1.union(&bb2);
        assert!((bb1.min_x).abs() < EPSILON);
        assert!((bb1.max_x - 10.0).abs() < EPSILON);

        // Unioning an empty box changes nothing
        let before = bb1;
        bb1.union(&BoundingBox::EMPTY);
        assert_eq!(bb1, before);
    }

    #[test]
    fn test_inflated_empty_stays_empty() {
        assert!(!BoundingBox::EMPTY.inflated(3.0).is_valid());
    }

    #[test]
    fn test_ellipse_bbox() {
        let e = GraphicsObject::Ellipse(EllipseObject::axis_aligned(
            Point::new(10.0, 10.0),
            4.0,
            2.0,
            StrokeStyle::new(1.0),
        ));
        let bb = object_bbox(&e);
        assert_eq!(bb.min_x, 6.0);
        assert_eq!(bb.max_x, 14.0);
        assert_eq!(bb.min_y, 8.0);
        assert_eq!(bb.max_y, 12.0);
    }

    #[test]
    fn test_degenerate_ellipse_has_no_bbox() {
        let e = GraphicsObject::Ellipse(EllipseObject::axis_aligned(
            Point::new(10.0, 10.0),
            0.0,
            2.0,
            StrokeStyle::new(1.0),
        ));
        assert!(!object_bbox(&e).is_valid());
    }

    #[test]
    fn test_picture_bbox_with_and_without_strokes() {
        let mut pic = Picture::new();
        pic.push(line(0.0, 0.0, 10.0, 0.0, 4.0));
        pic.push(GraphicsObject::Polyline(PolylineObject {
            points: vec![Point::new(0.0, 5.0), Point::new(0.0, 10.0), Point::new(6.0, 10.0)],
            style: StrokeStyle::new(2.0),
        }));

        let bare = picture_bbox(&pic, false);
        assert_eq!(bare.width(), 10.0);
        assert_eq!(bare.height(), 10.0);

        let inked = picture_bbox(&pic, true);
        assert_eq!(inked.min_y, -2.0);
        assert_eq!(inked.max_y, 11.0);
        assert_eq!(inked.max_x, 12.0);
    }
}
