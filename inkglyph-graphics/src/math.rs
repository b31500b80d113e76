//! Scalar mapping primitives.
//!
//! The layout code is written as chains of range remaps and clamps:
//! `map_range` (unclamped linear remap), `map_clamped`, `constrain`,
//! `lerp`, and a half-up `round_half_up`.

use crate::types::{Scalar, NEAR_ZERO};

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics: when `lo > hi` the upper bound
/// wins, and NaN collapses to `lo`.
#[inline]
pub fn constrain(v: Scalar, lo: Scalar, hi: Scalar) -> Scalar {
    if v.is_nan() {
        return lo.min(hi);
    }
    v.max(lo).min(hi)
}

/// Linear remap of `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]`.
///
/// The result is not clamped, so inputs outside the source range
/// extrapolate. A collapsed source range maps everything to `out_lo`.
#[inline]
pub fn map_range(v: Scalar, in_lo: Scalar, in_hi: Scalar, out_lo: Scalar, out_hi: Scalar) -> Scalar {
    let span = in_hi - in_lo;
    if span.abs() < NEAR_ZERO {
        return out_lo;
    }
    out_lo + (out_hi - out_lo) * ((v - in_lo) / span)
}

/// [`map_range`] followed by a clamp to the output range.
#[inline]
pub fn map_clamped(
    v: Scalar,
    in_lo: Scalar,
    in_hi: Scalar,
    out_lo: Scalar,
    out_hi: Scalar,
) -> Scalar {
    let mapped = map_range(v, in_lo, in_hi, out_lo, out_hi);
    constrain(mapped, out_lo.min(out_hi), out_lo.max(out_hi))
}

/// Linear interpolation: `a` at `t = 0`, `b` at `t = 1`.
#[inline]
pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    (b - a).mul_add(t, a)
}

/// Round to the nearest integer, halves toward positive infinity.
#[inline]
pub fn round_half_up(x: Scalar) -> Scalar {
    (x + 0.5).floor()
}

/// Replace non-finite values with `fallback`.
#[inline]
pub fn finite_or(v: Scalar, fallback: Scalar) -> Scalar {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
