//! Glyph assembly: a [`Form`] under a [`Disclosure`] becomes a [`Picture`].
//!
//! The picture is built in form coordinates, then moved onto the canvas by
//! one similarity-plus-shear transform: the form's bounding-box centre goes
//! to the origin, the slant shears it, the scale shrinks it, and the result
//! is centred on the canvas.

use inkglyph_core::form::Form;
use inkglyph_core::stage::{Component, Disclosure};
use inkglyph_core::RenderConfig;
use inkglyph_graphics::picture::{add_ellipse, add_line, add_polyline};
use inkglyph_graphics::transform::{scaled, shifted, slanted_deg, Transformable};
use inkglyph_graphics::types::{Picture, StrokeStyle, Transform};

/// Unlocked components of `form`, untransformed.
///
/// Every primitive is stroked at its own weight with the given miter limit.
/// Jong is one joined polyline when both legs are unlocked, its vertical
/// alone otherwise.
pub fn glyph_picture(form: &Form, disclosure: &Disclosure, miter_limit: f64) -> Picture {
    let base = StrokeStyle {
        miter_limit,
        ..StrokeStyle::default()
    };
    let style = |w| base.with_width(w);
    let mut pic = Picture::new();

    if disclosure.reveals(Component::ChoTop) {
        let top = &form.cho_top;
        add_line(&mut pic, top.long.start, top.long.end, style(top.long.weight));
        let second = top.second();
        add_line(&mut pic, second.start, second.end, style(second.weight));
    }
    if disclosure.reveals(Component::ChoCircle) {
        let e = &form.cho_circle.ellipse;
        add_ellipse(&mut pic, e.center, e.rx, e.ry, style(e.weight));
    }
    if disclosure.reveals(Component::Jung) {
        let jung = &form.jung;
        add_line(&mut pic, jung.vertical.start, jung.vertical.end, style(jung.vertical.weight));
        add_line(
            &mut pic,
            jung.horizontal.start,
            jung.horizontal.end,
            style(jung.horizontal.weight),
        );
    }
    let jong = &form.jong;
    if disclosure.reveals(Component::JongHorizontal) {
        add_polyline(&mut pic, jong.polyline().to_vec(), style(jong.weight.max(2.0)));
    } else if disclosure.reveals(Component::JongVertical) {
        add_line(&mut pic, jong.vertical.start, jong.vertical.end, style(jong.weight.max(2.0)));
    }
    pic
}

/// Transform placing `form` at the centre of the canvas.
pub fn glyph_transform(form: &Form, render: &RenderConfig) -> Transform {
    let c = form.bbox().center();
    shifted(-c.x, -c.y)
        .then(&slanted_deg(form.slant_deg))
        .then(&scaled(render.scale))
        .then(&shifted(render.width / 2.0, render.height / 2.0))
}

/// The unlocked components of `form`, placed on the canvas.
pub fn layout_glyph(form: &Form, disclosure: &Disclosure, render: &RenderConfig) -> Picture {
    glyph_picture(form, disclosure, render.miter_limit).transformed(&glyph_transform(form, render))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
