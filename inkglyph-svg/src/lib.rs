//! SVG renderer for `inkglyph` pictures.
//!
//! Converts a [`Picture`] into an SVG [`Document`] using the `svg` crate.
//!
//! Key design points:
//! - Glyph coordinates are already y-down canvas coordinates, so they are
//!   written as-is.
//! - Path data is built as raw `d` strings to preserve `f64` precision
//!   (the `svg` crate's `Data` builder uses `f32`).
//! - Axis-aligned ellipses become `<ellipse>` elements; sheared ones are
//!   flattened to cubic Béziers through `kurbo`.

pub mod glyph;

use std::fmt::Write as _;

use kurbo::{PathEl, Shape};
use svg::node::element::{Ellipse as SvgEllipse, Group, Path as SvgPath, Rectangle};
use svg::Document;

use inkglyph_core::stage::Disclosure;
use inkglyph_core::{Form, RenderConfig};
use inkglyph_graphics::bbox::{picture_bbox, BoundingBox};
use inkglyph_graphics::types::{
    Color, EllipseObject, GraphicsObject, LineObject, Picture, Point, PolylineObject, Scalar,
    StrokeStyle,
};

/// Flattening tolerance for sheared ellipses, in output units.
const ELLIPSE_TOLERANCE: Scalar = 0.01;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Which area of the plane the document shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// A fixed canvas with its origin at the top-left corner.
    Canvas { width: Scalar, height: Scalar },
    /// The picture's inked bounding box plus a margin.
    Fit { margin: Scalar },
}

/// Options controlling SVG output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub viewport: Viewport,
    /// Number of decimal places for coordinates. Default: 3.
    pub precision: usize,
    /// Fill painted behind the picture. Default: white.
    pub background: Option<Color>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl RenderOptions {
    /// Canvas-sized output matching a render configuration.
    #[must_use]
    pub const fn from_config(config: &RenderConfig) -> Self {
        Self {
            viewport: Viewport::Canvas {
                width: config.width,
                height: config.height,
            },
            precision: config.precision,
            background: Some(Color::WHITE),
        }
    }
}

/// Render a [`Picture`] to an SVG [`Document`].
#[must_use]
pub fn render(picture: &Picture, opts: &RenderOptions) -> Document {
    let content = picture
        .objects
        .iter()
        .fold(Group::new(), |group, obj| match obj {
            GraphicsObject::Line(line) => group.add(render_line(line, opts.precision)),
            GraphicsObject::Ellipse(ellipse) => match render_ellipse(ellipse, opts.precision) {
                EllipseNode::Ellipse(el) => group.add(el),
                EllipseNode::Path(el) => group.add(el),
                EllipseNode::Skipped => group,
            },
            GraphicsObject::Polyline(poly) => group.add(render_polyline(poly, opts.precision)),
        });

    build_document(&picture_bbox(picture, true), opts, content)
}

/// Render a [`Picture`] to an SVG string.
#[must_use]
pub fn render_to_string(picture: &Picture, opts: &RenderOptions) -> String {
    render(picture, opts).to_string()
}

/// Render the unlocked part of a form, centred on the configured canvas.
#[must_use]
pub fn render_form(form: &Form, disclosure: &Disclosure, config: &RenderConfig) -> Document {
    let picture = glyph::layout_glyph(form, disclosure, config);
    log::debug!(
        "rendering stage {} glyph: {} objects",
        disclosure.stage,
        picture.objects.len()
    );
    render(&picture, &RenderOptions::from_config(config))
}

/// [`render_form`] as a string.
#[must_use]
pub fn render_form_to_string(form: &Form, disclosure: &Disclosure, config: &RenderConfig) -> String {
    render_form(form, disclosure, config).to_string()
}

/// An empty canvas, shown before the first stroke and after a reset.
#[must_use]
pub fn render_blank(config: &RenderConfig) -> String {
    render_to_string(&Picture::new(), &RenderOptions::from_config(config))
}

// ---------------------------------------------------------------------------
// Individual object renderers
// ---------------------------------------------------------------------------

fn stroked(el: SvgPath, style: &StrokeStyle, precision: usize) -> SvgPath {
    el.set("fill", "none")
        .set("stroke", color_to_svg(style.color))
        .set("stroke-width", fmt_scalar(style.width, precision))
        .set("stroke-linecap", "square")
        .set("stroke-linejoin", "miter")
        .set("stroke-miterlimit", fmt_scalar(style.miter_limit, precision))
}

fn render_line(line: &LineObject, precision: usize) -> SvgPath {
    let mut d = String::with_capacity(48);
    d.push('M');
    write_point(&mut d, line.from, precision);
    d.push('L');
    write_point(&mut d, line.to, precision);
    stroked(SvgPath::new().set("d", d), &line.style, precision)
}

fn render_polyline(poly: &PolylineObject, precision: usize) -> SvgPath {
    stroked(
        SvgPath::new().set("d", polyline_to_d(&poly.points, precision)),
        &poly.style,
        precision,
    )
}

enum EllipseNode {
    Ellipse(SvgEllipse),
    Path(SvgPath),
    Skipped,
}

/// Axis-aligned ellipses keep their exact form; anything else is emitted
/// as a closed Bézier path.
fn render_ellipse(ellipse: &EllipseObject, precision: usize) -> EllipseNode {
    if ellipse.is_degenerate() {
        return EllipseNode::Skipped;
    }
    let t = &ellipse.shape;
    let style = &ellipse.style;
    if t.txy == 0.0 && t.tyx == 0.0 {
        let el = SvgEllipse::new()
            .set("cx", fmt_scalar(t.tx, precision))
            .set("cy", fmt_scalar(t.ty, precision))
            .set("rx", fmt_scalar(t.txx.abs(), precision))
            .set("ry", fmt_scalar(t.tyy.abs(), precision))
            .set("fill", "none")
            .set("stroke", color_to_svg(style.color))
            .set("stroke-width", fmt_scalar(style.width, precision))
            .set("stroke-miterlimit", fmt_scalar(style.miter_limit, precision));
        return EllipseNode::Ellipse(el);
    }
    let shape = kurbo::Ellipse::from_affine(t.to_affine());
    let d = path_els_to_d(shape.path_elements(ELLIPSE_TOLERANCE), precision);
    EllipseNode::Path(stroked(SvgPath::new().set("d", d), style, precision))
}

// ---------------------------------------------------------------------------
// Geometry → SVG "d" attribute
// ---------------------------------------------------------------------------

fn polyline_to_d(points: &[Point], precision: usize) -> String {
    let mut d = String::with_capacity(points.len() * 24);
    for (i, p) in points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        write_point(&mut d, *p, precision);
    }
    d
}

/// Convert `kurbo` path elements to an SVG path data string.
fn path_els_to_d(els: impl Iterator<Item = PathEl>, precision: usize) -> String {
    let mut d = String::new();
    for el in els {
        match el {
            PathEl::MoveTo(p) => {
                d.push('M');
                write_point(&mut d, p, precision);
            }
            PathEl::LineTo(p) => {
                d.push('L');
                write_point(&mut d, p, precision);
            }
            PathEl::QuadTo(p1, p2) => {
                d.push('Q');
                write_point(&mut d, p1, precision);
                d.push(' ');
                write_point(&mut d, p2, precision);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                d.push('C');
                write_point(&mut d, p1, precision);
                d.push(' ');
                write_point(&mut d, p2, precision);
                d.push(' ');
                write_point(&mut d, p3, precision);
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// Write "x,y" to the string with the given precision.
///
/// Normalizes negative zero to positive zero for cleaner output.
fn write_point(d: &mut String, p: Point, precision: usize) {
    let x = if p.x == 0.0 { 0.0 } else { p.x };
    let y = if p.y == 0.0 { 0.0 } else { p.y };
    let _ = write!(d, "{x:.precision$},{y:.precision$}");
}

// ---------------------------------------------------------------------------
// Color / attribute helpers
// ---------------------------------------------------------------------------

/// Convert a [`Color`] to an SVG color string.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "color components are clamped to [0, 255]"
)]
fn color_to_svg(c: Color) -> String {
    let r = (c.r.clamp(0.0, 1.0) * 255.0).round() as u8;
    let g = (c.g.clamp(0.0, 1.0) * 255.0).round() as u8;
    let b = (c.b.clamp(0.0, 1.0) * 255.0).round() as u8;
    if r == 0 && g == 0 && b == 0 {
        "black".to_owned()
    } else if r == 255 && g == 255 && b == 255 {
        "white".to_owned()
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_owned()
        } else {
            trimmed.to_owned()
        }
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

fn build_document(bb: &BoundingBox, opts: &RenderOptions, content: Group) -> Document {
    let (vb_x, vb_y, vb_w, vb_h) = match opts.viewport {
        Viewport::Canvas { width, height } => (0.0, 0.0, width, height),
        Viewport::Fit { margin } if bb.is_valid() => (
            bb.min_x - margin,
            bb.min_y - margin,
            2.0f64.mul_add(margin, bb.width()),
            2.0f64.mul_add(margin, bb.height()),
        ),
        Viewport::Fit { .. } => (0.0, 0.0, 100.0, 100.0),
    };
    let p = opts.precision;

    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, p),
                fmt_scalar(vb_y, p),
                fmt_scalar(vb_w, p),
                fmt_scalar(vb_h, p),
            ),
        )
        .set("width", fmt_scalar(vb_w, p))
        .set("height", fmt_scalar(vb_h, p));

    if let Some(bg) = opts.background {
        doc = doc.add(
            Rectangle::new()
                .set("x", fmt_scalar(vb_x, p))
                .set("y", fmt_scalar(vb_y, p))
                .set("width", fmt_scalar(vb_w, p))
                .set("height", fmt_scalar(vb_h, p))
                .set("fill", color_to_svg(bg)),
        );
    }

    doc.add(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use inkglyph_core::features::GestureFeatures;
    use inkglyph_core::synth::synthesize;
    use inkglyph_graphics::picture::{add_ellipse, add_line, add_polyline};
    use inkglyph_graphics::transform::{slanted, Transformable};

    fn fit() -> RenderOptions {
        RenderOptions {
            viewport: Viewport::Fit { margin: 1.0 },
            precision: 2,
            background: None,
        }
    }

    // -- d string tests --

    #[test]
    fn test_polyline_to_d() {
        let d = polyline_to_d(
            &[Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(5.5, 10.0)],
            1,
        );
        assert_eq!(d, "M0.0,0.0L0.0,10.0L5.5,10.0");
    }

    #[test]
    fn test_write_point_normalizes_negative_zero() {
        let mut d = String::new();
        write_point(&mut d, Point::new(-0.0, -0.0), 1);
        assert_eq!(d, "0.0,0.0");
    }

    #[test]
    fn test_path_els_to_d() {
        let els = [
            PathEl::MoveTo(Point::new(1.0, 2.0)),
            PathEl::CurveTo(Point::new(3.0, 4.0), Point::new(5.0, 6.0), Point::new(7.0, 8.0)),
            PathEl::ClosePath,
        ];
        assert_eq!(path_els_to_d(els.into_iter(), 0), "M1,2C3,4 5,6 7,8Z");
    }

    // -- attribute helpers --

    #[test]
    fn test_color_to_svg() {
        assert_eq!(color_to_svg(Color::BLACK), "black");
        assert_eq!(color_to_svg(Color::WHITE), "white");
        assert_eq!(color_to_svg(Color::new(1.0, 0.0, 0.0)), "#ff0000");
        assert_eq!(color_to_svg(Color::new(0.5, 0.5, 0.5)), "#808080");
    }

    #[test]
    fn test_fmt_scalar_trailing_zeros() {
        assert_eq!(fmt_scalar(1.0, 4), "1");
        assert_eq!(fmt_scalar(1.5, 4), "1.5");
        assert_eq!(fmt_scalar(1.25, 4), "1.25");
        assert_eq!(fmt_scalar(-0.0001, 3), "0");
    }

    // -- object renderers --

    #[test]
    fn test_render_line_attributes() {
        let line = LineObject {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 0.0),
            style: StrokeStyle::new(4.0),
        };
        let s = render_line(&line, 3).to_string();
        assert!(s.contains("d=\"M0.000,0.000L10.000,0.000\""), "{s}");
        assert!(s.contains("stroke-linecap=\"square\""), "{s}");
        assert!(s.contains("stroke-linejoin=\"miter\""), "{s}");
        assert!(s.contains("stroke-miterlimit=\"1.6\""), "{s}");
        assert!(s.contains("stroke-width=\"4\""), "{s}");
        assert!(s.contains("fill=\"none\""), "{s}");
    }

    #[test]
    fn test_axis_aligned_ellipse_stays_an_ellipse() {
        let e = EllipseObject::axis_aligned(Point::new(5.0, 6.0), 3.0, 2.0, StrokeStyle::new(1.0));
        match render_ellipse(&e, 2) {
            EllipseNode::Ellipse(el) => {
                let s = el.to_string();
                assert!(s.contains("cx=\"5\""), "{s}");
                assert!(s.contains("rx=\"3\""), "{s}");
                assert!(s.contains("ry=\"2\""), "{s}");
            }
            _ => panic!("expected <ellipse>"),
        }
    }

    #[test]
    fn test_sheared_ellipse_becomes_closed_path() {
        let e = EllipseObject::axis_aligned(Point::ZERO, 3.0, 2.0, StrokeStyle::new(1.0));
        let GraphicsObject::Ellipse(sheared) =
            GraphicsObject::Ellipse(e).transformed(&slanted(0.3))
        else {
            unreachable!()
        };
        match render_ellipse(&sheared, 2) {
            EllipseNode::Path(el) => {
                let s = el.to_string();
                assert!(s.contains(" d=\"M"), "{s}");
                assert!(s.contains("Z\""), "{s}");
            }
            _ => panic!("expected <path>"),
        }
    }

    #[test]
    fn test_degenerate_ellipse_is_skipped() {
        let e = EllipseObject::axis_aligned(Point::ZERO, 0.0, 2.0, StrokeStyle::new(1.0));
        assert!(matches!(render_ellipse(&e, 2), EllipseNode::Skipped));
    }

    // -- documents --

    #[test]
    fn test_render_empty_picture() {
        let svg = render_to_string(&Picture::new(), &fit());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 100 100\""), "{svg}");
    }

    #[test]
    fn test_fit_viewbox_covers_ink() {
        let mut pic = Picture::new();
        add_line(&mut pic, Point::new(10.0, 10.0), Point::new(30.0, 10.0), StrokeStyle::new(4.0));
        let svg = render_to_string(&pic, &fit());
        // ink spans x 8..32, y 8..12, plus a margin of 1
        assert!(svg.contains("viewBox=\"7 7 26 6\""), "{svg}");
    }

    #[test]
    fn test_canvas_viewbox_and_background() {
        let svg = render_blank(&RenderConfig::default());
        assert!(svg.contains("viewBox=\"0 0 600 600\""), "{svg}");
        assert!(svg.contains("fill=\"white\""), "{svg}");
    }

    #[test]
    fn test_render_mixed_picture() {
        let mut pic = Picture::new();
        add_line(&mut pic, Point::ZERO, Point::new(10.0, 0.0), StrokeStyle::new(1.0));
        add_ellipse(&mut pic, Point::new(5.0, 5.0), 2.0, 2.0, StrokeStyle::new(1.0));
        add_polyline(
            &mut pic,
            vec![Point::ZERO, Point::new(0.0, 5.0), Point::new(5.0, 5.0)],
            StrokeStyle::new(1.0),
        );
        let svg = render_to_string(&pic, &fit());
        assert_eq!(svg.matches("<path").count(), 2, "{svg}");
        assert_eq!(svg.matches("<ellipse").count(), 1, "{svg}");
    }

    #[test]
    fn test_render_form_complete() {
        let form = synthesize(&GestureFeatures {
            avg_speed: 0.5,
            avg_pressure: 0.5,
            avg_angle: 0.0,
            stroke_duration: 600.0,
            gesture_aspect_ratio: 1.2,
            gesture_compactness: 1.5,
            stroke_count: 3,
            path_curvature: 0.1,
            start_end_angle: 0.0,
        });
        let svg = render_form_to_string(&form, &Disclosure::COMPLETE, &RenderConfig::default());
        // long, second, two vowel strokes, Jong polyline
        assert_eq!(svg.matches("<path").count(), 5, "{svg}");
        assert_eq!(svg.matches("<ellipse").count(), 1, "{svg}");

        let none = render_form_to_string(&form, &Disclosure::NONE, &RenderConfig::default());
        assert_eq!(none.matches("<path").count(), 0);
    }
}
