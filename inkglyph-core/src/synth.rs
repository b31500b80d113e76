//! Form synthesis: gesture features to a constrained glyph layout.
//!
//! [`synthesize_with`] is a single ordered pass. Each step reads only values
//! fixed by earlier steps, and the later steps (horizontal clearance,
//! vertical clamp) only ever shrink or move what came before, so the
//! invariants established early still hold at the end.
//!
//! Inputs are sanitized first: non-finite features fall back to neutral
//! values and the unit-range features are clamped, which keeps every
//! intermediate length positive.

use inkglyph_graphics::math::{constrain, finite_or, lerp, map_clamped, map_range, round_half_up};
use inkglyph_graphics::types::{Point, Scalar};
use kurbo::Rect;
use log::trace;

use crate::config::{LayoutParams, GAP_FLOOR};
use crate::features::GestureFeatures;
use crate::form::{
    ChoCircle, ChoTop, ChoTopMode, Diagnostics, EllipseShape, Form, Jong, Jung, Segment,
};
use crate::stroke::DEFAULT_PRESSURE;

// Frames of the initial consonant and the vowel.
const CHO_FRAME_X: Scalar = 40.0;
const CHO_FRAME_SWAY: Scalar = 36.0;
const CHO_FRAME_Y: Scalar = 70.0;
const CHO_FRAME_W: Scalar = 110.0;
const CHO_FRAME_H: Scalar = 100.0;
const JUNG_FRAME_OFFSET: Scalar = 120.0;
const JUNG_FRAME_Y: Scalar = 70.0;
const JUNG_FRAME_W: Scalar = 80.0;
const JUNG_FRAME_MARGIN: Scalar = 8.0;

const MAX_BASE_WEIGHT: Scalar = 40.0;
const MIN_WEIGHT: Scalar = 2.0;
const MAX_WEIGHT: Scalar = 64.0;

const MIN_LONG_LEN: Scalar = 40.0;
const LONG_BELOW_VOWEL: Scalar = 12.0;
const SHORT_PER_LONG: Scalar = 2.2;
const CIRCLE_RX_PER_LONG: Scalar = 0.49;
const CIRCLE_RX_SLACK: Scalar = 8.0;
const HORIZONTAL_ASPECT: Scalar = 0.97;

const JONG_ZONE_PAD: Scalar = 10.0;
const JONG_ZONE_H: Scalar = 160.0;
const JONG_ZONE_INSET: Scalar = 12.0;

const MAX_SLANT_DEG: Scalar = 12.0;

/// Synthesize with the default layout parameters.
pub fn synthesize(features: &GestureFeatures) -> Form {
    synthesize_with(features, &LayoutParams::default())
}

/// Map a feature vector to a fully resolved form.
///
/// Deterministic and total: identical inputs give bit-identical forms, and
/// out-of-range inputs land on clamp boundaries rather than failing.
pub fn synthesize_with(features: &GestureFeatures, params: &LayoutParams) -> Form {
    let g = Inputs::from_features(features);
    let min_gap = params.min_gap.max(GAP_FLOOR);

    let target_gap = min_gap.max(round_half_up(
        20.0 + 12.0 * g.pressure + 10.0 * g.curvature,
    ));

    // Frames. The vowel frame stays put; the consonant frame may later be
    // pushed left to clear the vowel.
    let mut cho_x = CHO_FRAME_X + CHO_FRAME_SWAY * g.angle.sin();
    let jung_frame_x = cho_x + JUNG_FRAME_OFFSET;

    // Weights.
    let base = map_range(g.stroke_count, 1.0, 7.0, 10.0, 52.0);
    let contrast = constrain(map_range(g.aspect, 0.5, 2.0, 0.92, 1.08), 0.8, 1.2);
    let w_h = bumped((base * contrast).min(MAX_BASE_WEIGHT), params);
    let w_v = bumped((base / contrast).min(MAX_BASE_WEIGHT), params);
    let mean_w = (w_h + w_v) / 2.0;
    let circle_w = mean_w.min(MAX_WEIGHT);
    let jong_w = mean_w.max(4.0);
    let short_w = (0.9 * w_h).max(MIN_WEIGHT);

    let mode = if g.aspect > HORIZONTAL_ASPECT {
        ChoTopMode::Horizontal
    } else {
        ChoTopMode::Vertical
    };
    let cho_top_y = CHO_FRAME_Y + CHO_FRAME_H * map_clamped(g.angle, -1.5, 1.5, 0.14, 0.30);

    // Lengths.
    let long_raw = map_range(g.speed, 0.0, 1.0, 110.0, 290.0);
    let short_ratio = constrain(
        0.25 + 0.60 * g.speed + 0.55 * g.pressure + 0.65 * g.curvature,
        0.15,
        0.85,
    );
    let vowel_len = constrain(
        80.0 + 240.0 * g.speed + 110.0 * g.pressure + 120.0 * g.curvature,
        50.0,
        380.0,
    );
    let mut long = long_raw.min(vowel_len - LONG_BELOW_VOWEL).max(MIN_LONG_LEN);
    let mut short = (long_raw * short_ratio).min(long / SHORT_PER_LONG);

    // Circle proportions.
    let wide = map_clamped(g.aspect, 0.6, 2.2, 0.0, 1.0);
    let horiz = 1.0 - (map_clamped(g.angle, -1.2, 1.2, 0.0, 1.0) - 0.5).abs() * 2.0;
    let mut ratio = lerp(0.55, 1.85, 0.55 * wide + 0.45 * horiz);
    ratio = lerp(ratio, 1.0, map_clamped(g.curvature, 0.4, 1.2, 0.0, 1.0));
    let base_r = constrain(
        lerp(
            18.0,
            (CHO_FRAME_H * 0.75).min(CHO_FRAME_W * 0.65),
            0.6 * g.pressure + 0.4 * map_clamped(g.stroke_count, 1.0, 6.0, 0.0, 1.0),
        ),
        14.0,
        (CHO_FRAME_H * 0.8).min(CHO_FRAME_W * 0.7),
    );
    let (rx, ry) = if ratio >= 1.0 {
        (base_r * ratio, base_r)
    } else {
        (base_r, base_r / ratio)
    };
    let mut rx = circle_rx(rx, short, long);

    // Vertical placement around the long bar.
    let long_top = cho_top_y - w_h / 2.0;
    let long_bottom = cho_top_y + w_h / 2.0;
    let short_y = long_top - target_gap - w_h / 2.0;
    let cy = long_bottom + target_gap + ry;
    let stem_factor = map_clamped(g.aspect, 0.5, 2.0, 0.38, 0.68);

    let first_top = match mode {
        ChoTopMode::Horizontal => short_y - w_h / 2.0,
        ChoTopMode::Vertical => (cho_top_y - long * stem_factor) - w_v / 2.0,
    };
    let vowel_top = (JUNG_FRAME_Y + JUNG_FRAME_MARGIN).min(first_top);
    let mut vowel_bottom = vowel_top + vowel_len;

    // Horizontal clearance between the bars and the vowel vertical.
    let jung_max_x = jung_frame_x + JUNG_FRAME_W - JUNG_FRAME_MARGIN;
    let mut jung_x = constrain(
        jung_frame_x + JUNG_FRAME_W * map_range(g.compactness, 1.0, 3.0, 0.25, 0.85),
        jung_frame_x + JUNG_FRAME_MARGIN,
        jung_max_x,
    );
    let mut center_x = cho_x + CHO_FRAME_W / 2.0;
    let cho_right = center_x + long.max(short) / 2.0 + w_h / 2.0;
    let needed = target_gap + mean_w;
    let clearance = (jung_x - w_v / 2.0) - cho_right;
    if clearance < needed {
        let deficit = needed - clearance;
        let shift = deficit.min(jung_max_x - jung_x);
        jung_x += shift;
        let residual = deficit - shift;
        if residual > 0.0 {
            trace!("vowel at frame margin, moving consonant left by {residual:.3}");
            cho_x -= residual;
            center_x -= residual;
        }
    }

    // The vowel may not hang far below the circle, and the long bar must
    // stay shorter than what remains of it.
    let circle_bottom = cy + ry + w_h / 2.0;
    vowel_bottom = vowel_bottom.min(circle_bottom + 0.25 * target_gap);
    let vowel_span = vowel_bottom - vowel_top;
    if long > vowel_span - LONG_BELOW_VOWEL {
        long = (vowel_span - LONG_BELOW_VOWEL).max(MIN_LONG_LEN);
        short = short.min(long / SHORT_PER_LONG);
        rx = circle_rx(rx, short, long);
    }

    let cho_top = ChoTop {
        mode,
        long: Segment::horizontal(cho_top_y, center_x - long / 2.0, center_x + long / 2.0, w_h),
        short: Segment::horizontal(
            short_y,
            center_x - short / 2.0,
            center_x + short / 2.0,
            short_w,
        ),
        stem: Segment::vertical(center_x, cho_top_y, cho_top_y - long * stem_factor, w_v),
    };
    let cho_circle = ChoCircle {
        ellipse: EllipseShape {
            center: Point::new(center_x, cy),
            rx,
            ry,
            weight: circle_w,
        },
    };

    let vowel_mid = (vowel_top + vowel_bottom) / 2.0;
    let side_len = map_clamped(g.angle, -1.5, 1.5, 16.0, 66.0);
    let jung = Jung {
        vertical: Segment::vertical(jung_x, vowel_top, vowel_bottom, w_v),
        horizontal: Segment::horizontal(vowel_mid, jung_x, jung_x + side_len, w_h),
    };

    let jong = place_jong(
        &g,
        circle_bottom + min_gap.max(round_half_up(0.6 * target_gap)),
        cho_x,
        jung_frame_x,
        jong_w,
    );

    let slant_center = map_clamped(g.start_end, -1.2, 1.2, -1.0, 1.0);
    let slant_amp = MAX_SLANT_DEG * (0.55 + 0.45 * map_clamped(g.speed, 400.0, 1400.0, 0.0, 1.0));
    let slant_deg = constrain(slant_center * slant_amp, -MAX_SLANT_DEG, MAX_SLANT_DEG);

    Form {
        cho_top,
        cho_circle,
        jung,
        jong,
        target_gap,
        slant_deg,
        checks: Diagnostics {
            long_len: long,
            short_len: short,
            circle_rx: rx,
            vowel_len: vowel_span,
        },
    }
}

/// Top-stroke weight plus the configured bump, within the weight range.
fn bumped(w: Scalar, params: &LayoutParams) -> Scalar {
    let bump = (w * params.weight_bump_ratio).min(params.weight_bump_max);
    constrain(w + bump, MIN_WEIGHT, MAX_WEIGHT)
}

/// The circle must be wider than the short bar and narrower than the long.
fn circle_rx(rx: Scalar, short: Scalar, long: Scalar) -> Scalar {
    rx.max((short + CIRCLE_RX_SLACK) / 2.0)
        .min(CIRCLE_RX_PER_LONG * long)
}

/// Place the final consonant inside its zone below the circle.
fn place_jong(g: &Inputs, zone_top: Scalar, cho_x: Scalar, jung_frame_x: Scalar, weight: Scalar) -> Jong {
    let left = cho_x.min(jung_frame_x) - JONG_ZONE_PAD;
    let right = (cho_x + CHO_FRAME_W).max(jung_frame_x + JUNG_FRAME_W) + JONG_ZONE_PAD;
    let zone = Rect::new(left, zone_top, right, zone_top + JONG_ZONE_H);

    let x1 = zone.x0 + JONG_ZONE_INSET;
    let x2 = zone.x1 - JONG_ZONE_INSET;
    let y1 = zone.y0 + JONG_ZONE_INSET;
    let y2 = zone.y1 - JONG_ZONE_INSET;
    let span_x = x2 - x1;
    let span_y = y2 - y1;

    let v_ratio = constrain(
        0.24 + 0.80 * g.pressure * (0.95 + 0.25 * map_range(g.compactness, 1.0, 3.0, 0.0, 1.0)),
        0.20,
        0.92,
    );
    let h_ratio = constrain(0.28 + 0.85 * g.speed * (1.0 + 0.25 * g.curvature), 0.22, 0.98);
    let v_len = constrain(span_y * v_ratio, 16.0, (span_y - 8.0).max(18.0));
    let h_len = constrain(span_x * h_ratio, 24.0, (span_x - 8.0).max(24.0));

    let nx = 0.50
        + 0.50 * (1.37 * g.angle + 0.6).sin()
        + 0.40 * (1.73 * g.start_end - 0.4).sin()
        + 0.30 * map_range(g.compactness, 1.0, 3.0, -0.6, 0.6)
        + 0.20 * map_range(g.speed, 0.0, 1.0, -0.5, 0.5);
    let ny = 0.06
        + 0.45 * g.speed
        + 0.20 * map_range(g.curvature, 0.0, 1.0, -0.3, 0.3)
        + 0.18 * (2.1 * g.start_end).sin();
    let nx = constrain(nx, 0.05, 0.95);
    let ny = constrain(ny, 0.04, 0.90);

    let x = constrain(x1 + (span_x - h_len) * nx, x1, x2 - h_len);
    let top = constrain(y1 + (span_y - v_len) * ny, y1, y2 - v_len);
    let corner = top + v_len;

    Jong {
        vertical: Segment::vertical(x, top, corner, weight),
        horizontal: Segment::horizontal(corner, x, x + h_len, weight),
        weight,
        zone,
    }
}

/// Feature values as the layout consumes them.
struct Inputs {
    speed: Scalar,
    pressure: Scalar,
    angle: Scalar,
    aspect: Scalar,
    compactness: Scalar,
    stroke_count: Scalar,
    curvature: Scalar,
    start_end: Scalar,
}

impl Inputs {
    fn from_features(f: &GestureFeatures) -> Self {
        Self {
            speed: finite_or(f.avg_speed, 0.0).max(0.0),
            pressure: constrain(finite_or(f.avg_pressure, DEFAULT_PRESSURE), 0.0, 1.0),
            angle: finite_or(f.avg_angle, 0.0),
            aspect: finite_or(f.gesture_aspect_ratio, 1.0).max(0.0),
            compactness: finite_or(f.gesture_compactness, 1.0).max(0.0),
            stroke_count: Scalar::from(f.stroke_count.max(1)),
            curvature: constrain(finite_or(f.path_curvature, 0.0), 0.0, 1.0),
            start_end: finite_or(f.start_end_angle, 0.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
