//! Core types shared across the `inkglyph` crates.
//!
//! These types define the drawing model the glyph renderer works in:
//! stroke styles, the six-component affine [`Transform`], and the
//! [`Picture`] of stroked objects (lines, ellipses, polylines).

pub use kurbo::{Affine, Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias. All geometry is `f64` for compatibility with `kurbo`.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1.0 / 65536.0;

/// Threshold below which a length or determinant is treated as zero.
pub const NEAR_ZERO: Scalar = 1e-12;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: Scalar,
    pub g: Scalar,
    pub b: Scalar,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    #[inline]
    pub const fn new(r: Scalar, g: Scalar, b: Scalar) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ---------------------------------------------------------------------------
// StrokeStyle
// ---------------------------------------------------------------------------

/// How a primitive is stroked. Caps are always square and joins mitered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: Scalar,
    pub color: Color,
    pub miter_limit: Scalar,
}

impl StrokeStyle {
    /// A black stroke of the given width.
    #[must_use]
    pub fn new(width: Scalar) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Same style with a different width.
    #[must_use]
    pub fn with_width(mut self, width: Scalar) -> Self {
        self.width = width;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::BLACK,
            miter_limit: 1.6,
        }
    }
}

// ---------------------------------------------------------------------------
// Transform (6-component)
// ---------------------------------------------------------------------------

/// An affine transform with named components.
///
/// Maps point (x, y) to:
///   (tx + txx*x + txy*y, ty + tyx*x + tyy*y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub tx: Scalar,
    pub ty: Scalar,
    pub txx: Scalar,
    pub txy: Scalar,
    pub tyx: Scalar,
    pub tyy: Scalar,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        txx: 1.0,
        txy: 0.0,
        tyx: 0.0,
        tyy: 1.0,
    };

    /// Convert to a kurbo `Affine`.
    ///
    /// kurbo Affine coefficients: [a, b, c, d, e, f]
    /// mapping: x' = a*x + c*y + e,  y' = b*x + d*y + f
    #[inline]
    #[must_use]
    pub const fn to_affine(self) -> Affine {
        Affine::new([self.txx, self.tyx, self.txy, self.tyy, self.tx, self.ty])
    }

    /// Apply this transform to a point.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.txy.mul_add(p.y, self.txx.mul_add(p.x, self.tx)),
            self.tyy.mul_add(p.y, self.tyx.mul_add(p.x, self.ty)),
        )
    }

    /// Compose: `self` applied first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            txx: next.txx.mul_add(self.txx, next.txy * self.tyx),
            txy: next.txx.mul_add(self.txy, next.txy * self.tyy),
            tyx: next.tyx.mul_add(self.txx, next.tyy * self.tyx),
            tyy: next.tyx.mul_add(self.txy, next.tyy * self.tyy),
            tx: next.txy.mul_add(self.ty, next.txx.mul_add(self.tx, next.tx)),
            ty: next.tyy.mul_add(self.ty, next.tyx.mul_add(self.tx, next.ty)),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Picture and GraphicsObject
// ---------------------------------------------------------------------------

/// A single stroked object in a picture.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsObject {
    /// A straight segment.
    Line(LineObject),
    /// An ellipse outline.
    Ellipse(EllipseObject),
    /// An open polyline with joined corners.
    Polyline(PolylineObject),
}

/// A straight stroked segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineObject {
    pub from: Point,
    pub to: Point,
    pub style: StrokeStyle,
}

/// A stroked ellipse, stored as the affine image of the unit circle.
///
/// Keeping the transform instead of centre and radii lets the ellipse survive
/// shears and rotations exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseObject {
    pub shape: Transform,
    pub style: StrokeStyle,
}

impl EllipseObject {
    /// An axis-aligned ellipse.
    #[must_use]
    pub const fn axis_aligned(center: Point, rx: Scalar, ry: Scalar, style: StrokeStyle) -> Self {
        Self {
            shape: Transform {
                tx: center.x,
                ty: center.y,
                txx: rx,
                txy: 0.0,
                tyx: 0.0,
                tyy: ry,
            },
            style,
        }
    }

    /// Centre of the ellipse.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.shape.tx, self.shape.ty)
    }

    /// Whether the ellipse has collapsed to a segment or a point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let t = &self.shape;
        t.txx.mul_add(t.tyy, -(t.txy * t.tyx)).abs() < NEAR_ZERO
    }

    /// Half-extents of the axis-aligned box enclosing the ellipse.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        let t = &self.shape;
        Vec2::new(t.txx.hypot(t.txy), t.tyx.hypot(t.tyy))
    }
}

/// A stroked open polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineObject {
    pub points: Vec<Point>,
    pub style: StrokeStyle,
}

impl GraphicsObject {
    /// The stroke style of this object.
    #[must_use]
    pub const fn style(&self) -> &StrokeStyle {
        match self {
            Self::Line(line) => &line.style,
            Self::Ellipse(ellipse) => &ellipse.style,
            Self::Polyline(poly) => &poly.style,
        }
    }
}

/// An ordered collection of stroked objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Picture {
    pub objects: Vec<GraphicsObject>,
}

impl Picture {
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn push(&mut self, obj: GraphicsObject) {
        self.objects.push(obj);
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
