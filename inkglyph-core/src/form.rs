//! The resolved glyph form.
//!
//! A [`Form`] is the synthesizer's output: every primitive of the four glyph
//! components with its own stroke weight, in y-down canvas coordinates.

use inkglyph_graphics::bbox::BoundingBox;
use inkglyph_graphics::types::{Point, Scalar};
use kurbo::Rect;

use crate::panel::ParamValue;

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// A straight stroked segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub weight: Scalar,
}

impl Segment {
    pub const fn new(start: Point, end: Point, weight: Scalar) -> Self {
        Self { start, end, weight }
    }

    pub fn horizontal(y: Scalar, x1: Scalar, x2: Scalar, weight: Scalar) -> Self {
        Self::new(Point::new(x1, y), Point::new(x2, y), weight)
    }

    pub fn vertical(x: Scalar, y1: Scalar, y2: Scalar, weight: Scalar) -> Self {
        Self::new(Point::new(x, y1), Point::new(x, y2), weight)
    }

    pub fn length(&self) -> Scalar {
        self.start.distance(self.end)
    }
}

/// An axis-aligned stroked ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseShape {
    pub center: Point,
    pub rx: Scalar,
    pub ry: Scalar,
    pub weight: Scalar,
}

impl EllipseShape {
    /// Top of the centre line.
    pub fn top(&self) -> Scalar {
        self.center.y - self.ry
    }

    /// Bottom of the centre line.
    pub fn bottom(&self) -> Scalar {
        self.center.y + self.ry
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Which second stroke accompanies the long ChoTop bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoTopMode {
    /// A short bar above the long one.
    Horizontal,
    /// A vertical stem rising from the long bar's centre.
    Vertical,
}

impl ChoTopMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// The top of the initial consonant: a long bar plus a short bar or stem.
///
/// Both candidate second strokes are resolved; [`ChoTop::second`] picks the
/// one the mode draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoTop {
    pub mode: ChoTopMode,
    pub long: Segment,
    pub short: Segment,
    pub stem: Segment,
}

impl ChoTop {
    pub const fn second(&self) -> &Segment {
        match self.mode {
            ChoTopMode::Horizontal => &self.short,
            ChoTopMode::Vertical => &self.stem,
        }
    }

    /// Rightmost inked extent of the bars.
    pub fn right_extent(&self) -> Scalar {
        self.long.end.x.max(self.short.end.x) + self.long.weight / 2.0
    }
}

/// The circle under the ChoTop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoCircle {
    pub ellipse: EllipseShape,
}

/// The vowel: a tall vertical with a side bar at its midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jung {
    pub vertical: Segment,
    pub horizontal: Segment,
}

/// The final consonant: a vertical then a horizontal joined at a corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jong {
    pub vertical: Segment,
    pub horizontal: Segment,
    /// Stroke weight shared by both legs.
    pub weight: Scalar,
    /// Region the component was placed in.
    pub zone: Rect,
}

impl Jong {
    /// Top of the vertical, the corner, and the end of the horizontal.
    pub const fn polyline(&self) -> [Point; 3] {
        [self.vertical.start, self.vertical.end, self.horizontal.end]
    }
}

/// Final lengths after every constraint pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub long_len: Scalar,
    pub short_len: Scalar,
    pub circle_rx: Scalar,
    pub vowel_len: Scalar,
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Form {
    pub cho_top: ChoTop,
    pub cho_circle: ChoCircle,
    pub jung: Jung,
    pub jong: Jong,
    pub target_gap: Scalar,
    /// Italic slant in degrees, positive leans right.
    pub slant_deg: Scalar,
    pub checks: Diagnostics,
}

impl Form {
    /// Centre-line bounds of the whole form.
    ///
    /// Covers every component whatever the disclosure, so the glyph keeps
    /// its position while parts are revealed. A degenerate circle is left
    /// out.
    pub fn bbox(&self) -> BoundingBox {
        let second = self.cho_top.second();
        let mut bb = BoundingBox::from_points([
            self.cho_top.long.start,
            self.cho_top.long.end,
            second.start,
            second.end,
            self.jung.vertical.start,
            self.jung.vertical.end,
            self.jung.horizontal.start,
            self.jung.horizontal.end,
            self.jong.vertical.start,
            self.jong.vertical.end,
            self.jong.horizontal.start,
            self.jong.horizontal.end,
        ]);
        let e = &self.cho_circle.ellipse;
        if e.rx > 0.0 && e.ry > 0.0 {
            bb.include_point(Point::new(e.center.x - e.rx, e.center.y - e.ry));
            bb.include_point(Point::new(e.center.x + e.rx, e.center.y + e.ry));
        }
        bb
    }

    /// Flattened `key → value` pairs for the parameter panel, keys sorted.
    pub fn entries(&self) -> Vec<(&'static str, ParamValue)> {
        use ParamValue::Number as N;

        let top = &self.cho_top;
        let circle = &self.cho_circle.ellipse;
        let jung = &self.jung;
        let jong = &self.jong;

        let mut out = vec![
            ("checks.circle_rx", N(self.checks.circle_rx)),
            ("checks.long_len", N(self.checks.long_len)),
            ("checks.short_len", N(self.checks.short_len)),
            ("checks.vowel_len", N(self.checks.vowel_len)),
            ("cho_circle_cx", N(circle.center.x)),
            ("cho_circle_cy", N(circle.center.y)),
            ("cho_circle_rx", N(circle.rx)),
            ("cho_circle_ry", N(circle.ry)),
            ("cho_circle_weight", N(circle.weight)),
            ("cho_top_mode", ParamValue::Text(top.mode.as_str())),
            ("cho_top_short_weight", N(top.short.weight)),
            ("cho_top_short_x1", N(top.short.start.x)),
            ("cho_top_short_x2", N(top.short.end.x)),
            ("cho_top_short_y", N(top.short.start.y)),
            ("cho_top_vert_weight", N(top.stem.weight)),
            ("cho_top_vert_x", N(top.stem.start.x)),
            ("cho_top_vert_y1", N(top.stem.start.y)),
            ("cho_top_vert_y2", N(top.stem.end.y)),
            ("cho_top_weight", N(top.long.weight)),
            ("cho_top_x1", N(top.long.start.x)),
            ("cho_top_x2", N(top.long.end.x)),
            ("cho_top_y", N(top.long.start.y)),
            ("jong_h_x1", N(jong.horizontal.start.x)),
            ("jong_h_x2", N(jong.horizontal.end.x)),
            ("jong_h_y", N(jong.horizontal.start.y)),
            ("jong_v_x", N(jong.vertical.start.x)),
            ("jong_v_y1", N(jong.vertical.start.y)),
            ("jong_v_y2", N(jong.vertical.end.y)),
            ("jong_weight", N(jong.weight)),
            ("jung_h_weight", N(jung.horizontal.weight)),
            ("jung_h_x1", N(jung.horizontal.start.x)),
            ("jung_h_x2", N(jung.horizontal.end.x)),
            ("jung_h_y", N(jung.horizontal.start.y)),
            ("jung_weight", N(jung.vertical.weight)),
            ("jung_x", N(jung.vertical.start.x)),
            ("jung_y1", N(jung.vertical.start.y)),
            ("jung_y2", N(jung.vertical.end.y)),
            ("slant_deg", N(self.slant_deg)),
            ("target_gap", N(self.target_gap)),
        ];
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
