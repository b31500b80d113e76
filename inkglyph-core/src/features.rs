//! Gesture feature extraction.
//!
//! Reduces a [`Gesture`] to the fixed [`GestureFeatures`] record that drives
//! form synthesis. Every statistic is taken over the flattened sample
//! sequence, so the jump from one stroke's last sample to the next stroke's
//! first sample counts as a step like any other.

use std::f64::consts::PI;

use inkglyph_graphics::bbox::BoundingBox;
use inkglyph_graphics::types::Scalar;
use serde::{Deserialize, Serialize};

use crate::stroke::{Gesture, Sample};

/// Elapsed time between two samples never counts as less than this.
const MIN_STEP_TIME: Scalar = 1.0;

/// Total turning that saturates `path_curvature` (two full rotations).
const FULL_CURVATURE_TURN: Scalar = 4.0 * PI;

/// The gesture-feature vector.
///
/// Angles are radians in `(-π, π]`, speeds are distance units per time unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureFeatures {
    pub avg_speed: Scalar,
    pub avg_pressure: Scalar,
    /// Arithmetic (not circular) mean of step directions. Steps alternating
    /// around ±π average to roughly 0; the layout is tuned against this.
    pub avg_angle: Scalar,
    pub stroke_duration: Scalar,
    pub gesture_aspect_ratio: Scalar,
    pub gesture_compactness: Scalar,
    pub stroke_count: u32,
    pub path_curvature: Scalar,
    pub start_end_angle: Scalar,
}

impl GestureFeatures {
    /// Flattened `key → value` pairs for the parameter panel, keys sorted.
    pub fn entries(&self) -> Vec<(&'static str, Scalar)> {
        vec![
            ("avg_angle", self.avg_angle),
            ("avg_pressure", self.avg_pressure),
            ("avg_speed", self.avg_speed),
            ("gesture_aspect_ratio", self.gesture_aspect_ratio),
            ("gesture_compactness", self.gesture_compactness),
            ("path_curvature", self.path_curvature),
            ("start_end_angle", self.start_end_angle),
            ("stroke_count", Scalar::from(self.stroke_count)),
            ("stroke_duration", self.stroke_duration),
        ]
    }
}

/// Extract the feature vector from a gesture.
///
/// Total: single-sample gestures produce zero speed, angle and curvature
/// rather than failing.
pub fn extract(gesture: &Gesture<'_>) -> GestureFeatures {
    let mut total_dist = 0.0;
    let mut total_time = 0.0;
    let mut angles: Vec<Scalar> = Vec::with_capacity(gesture.sample_count());
    let mut pressure_sum = 0.0;
    let mut count = 0usize;
    let mut bb = BoundingBox::EMPTY;
    let mut first: Option<&Sample> = None;
    let mut prev: Option<&Sample> = None;

    for sample in gesture.samples() {
        count += 1;
        pressure_sum += sample.pressure_or_default();
        bb.include_point(sample.position());
        if first.is_none() {
            first = Some(sample);
        }
        if let Some(p) = prev {
            let dx = sample.x - p.x;
            let dy = sample.y - p.y;
            total_dist += dx.hypot(dy);
            total_time += (sample.t - p.t).max(MIN_STEP_TIME);
            angles.push(dy.atan2(dx));
        }
        prev = Some(sample);
    }

    let (stroke_duration, start_end_angle) = match (first, prev) {
        (Some(f), Some(l)) => (l.t - f.t, (l.y - f.y).atan2(l.x - f.x)),
        _ => (0.0, 0.0),
    };

    let width = bb.width();
    let height = bb.height();
    let step_count = angles.len();

    let avg_angle = if step_count == 0 {
        0.0
    } else {
        angles.iter().sum::<Scalar>() / step_count as Scalar
    };
    let turning: Scalar = angles.windows(2).map(|w| (w[1] - w[0]).abs()).sum();

    GestureFeatures {
        avg_speed: total_dist / total_time.max(MIN_STEP_TIME),
        avg_pressure: pressure_sum / count.max(1) as Scalar,
        avg_angle,
        stroke_duration,
        gesture_aspect_ratio: if height == 0.0 { 1.0 } else { width / height },
        gesture_compactness: if width + height == 0.0 {
            1.0
        } else {
            total_dist / (width + height)
        },
        stroke_count: u32::try_from(gesture.stroke_count()).unwrap_or(u32::MAX),
        path_curvature: (turning / FULL_CURVATURE_TURN).min(1.0),
        start_end_angle,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
