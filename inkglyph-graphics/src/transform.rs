//! Affine transform operations for picture objects.
//!
//! The glyph renderer only needs a handful of primitives:
//! - `shifted (dx, dy)`: translate
//! - `scaled s`: uniform scale
//! - `slanted s`: horizontal shear
//! - `slanted_deg a`: horizontal shear by an angle in degrees
//!
//! The [`Transformable`] trait provides a uniform interface for applying
//! transforms to all graphics types.

use crate::types::{
    EllipseObject, GraphicsObject, LineObject, Picture, Point, PolylineObject, Scalar,
    StrokeStyle, Transform,
};

// ---------------------------------------------------------------------------
// Transformable trait
// ---------------------------------------------------------------------------

/// A type that can be transformed by an affine [`Transform`].
pub trait Transformable {
    /// Apply a transform, returning the transformed value.
    #[must_use]
    fn transformed(&self, t: &Transform) -> Self;
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

impl Transformable for Point {
    #[inline]
    fn transformed(&self, t: &Transform) -> Self {
        t.apply(*self)
    }
}

impl Transformable for Transform {
    /// Compose: `self` applied first, then `t`.
    #[inline]
    fn transformed(&self, t: &Transform) -> Self {
        self.then(t)
    }
}

impl Transformable for StrokeStyle {
    /// Stroke widths follow the area scale of the transform, so a shear
    /// leaves them untouched and a uniform scale multiplies them.
    fn transformed(&self, t: &Transform) -> Self {
        let scale = determinant(t).abs().sqrt();
        self.with_width(self.width * scale)
    }
}

impl Transformable for GraphicsObject {
    fn transformed(&self, t: &Transform) -> Self {
        match self {
            Self::Line(line) => Self::Line(LineObject {
                from: line.from.transformed(t),
                to: line.to.transformed(t),
                style: line.style.transformed(t),
            }),
            Self::Ellipse(ellipse) => Self::Ellipse(EllipseObject {
                shape: ellipse.shape.transformed(t),
                style: ellipse.style.transformed(t),
            }),
            Self::Polyline(poly) => Self::Polyline(PolylineObject {
                points: poly.points.iter().map(|p| p.transformed(t)).collect(),
                style: poly.style.transformed(t),
            }),
        }
    }
}

impl Transformable for Picture {
    fn transformed(&self, t: &Transform) -> Self {
        Self {
            objects: self.objects.iter().map(|obj| obj.transformed(t)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Standard transform constructors
// ---------------------------------------------------------------------------

/// Create a translation transform.
#[must_use]
pub const fn shifted(dx: Scalar, dy: Scalar) -> Transform {
    Transform {
        tx: dx,
        ty: dy,
        ..Transform::IDENTITY
    }
}

/// Create a uniform scaling transform.
#[must_use]
pub const fn scaled(factor: Scalar) -> Transform {
    Transform {
        tx: 0.0,
        ty: 0.0,
        txx: factor,
        txy: 0.0,
        tyx: 0.0,
        tyy: factor,
    }
}

/// Create a horizontal shear (slant) transform: `x' = x + factor * y`.
#[must_use]
pub const fn slanted(factor: Scalar) -> Transform {
    Transform {
        txy: factor,
        ..Transform::IDENTITY
    }
}

/// Horizontal shear by an angle in degrees, the way a canvas `shearX` works.
#[must_use]
pub fn slanted_deg(degrees: Scalar) -> Transform {
    slanted(degrees.to_radians().tan())
}

// ---------------------------------------------------------------------------
// Transform utilities
// ---------------------------------------------------------------------------

/// Determinant of a transform.
#[must_use]
pub fn determinant(t: &Transform) -> Scalar {
    t.txx.mul_add(t.tyy, -(t.txy * t.tyx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
