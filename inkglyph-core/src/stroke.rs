//! Pointer samples, strokes, and the capture store that owns them.
//!
//! [`StrokeCapture`] is the only mutable state in the pipeline. The rest of
//! the crate reads it through a [`Gesture`], a borrowed view that is
//! guaranteed to contain at least one sample.

use inkglyph_graphics::types::{Point, Scalar};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Pressure assumed when the input device does not report one.
pub const DEFAULT_PRESSURE: Scalar = 0.5;

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One pointer sample: position, monotonic time, and pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: Scalar,
    pub y: Scalar,
    pub t: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Scalar>,
}

impl Sample {
    pub const fn new(x: Scalar, y: Scalar, t: Scalar) -> Self {
        Self {
            x,
            y,
            t,
            pressure: None,
        }
    }

    #[must_use]
    pub fn with_pressure(mut self, pressure: Scalar) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Reported pressure, or [`DEFAULT_PRESSURE`].
    pub fn pressure_or_default(&self) -> Scalar {
        self.pressure.unwrap_or(DEFAULT_PRESSURE)
    }

    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Stroke
// ---------------------------------------------------------------------------

/// One continuous pointer-down to pointer-up path, in temporal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    samples: Vec<Sample>,
}

impl Stroke {
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

impl From<Vec<Sample>> for Stroke {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for Stroke {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Gesture view
// ---------------------------------------------------------------------------

/// A borrowed, non-empty view of committed strokes plus an optional live one.
///
/// This is the only input the feature extractor accepts, so "no strokes"
/// can never reach it.
#[derive(Debug, Clone, Copy)]
pub struct Gesture<'a> {
    committed: &'a [Stroke],
    live: Option<&'a Stroke>,
}

impl<'a> Gesture<'a> {
    /// Build a view. A live stroke without samples is ignored; returns `None`
    /// when nothing has been drawn at all.
    pub fn new(committed: &'a [Stroke], live: Option<&'a Stroke>) -> Option<Self> {
        let live = live.filter(|s| !s.is_empty());
        let gesture = Self { committed, live };
        (gesture.sample_count() > 0).then_some(gesture)
    }

    /// Committed strokes followed by the live stroke, if any.
    pub fn strokes(&self) -> impl Iterator<Item = &'a Stroke> + 'a {
        self.committed.iter().chain(self.live)
    }

    /// All samples of all strokes, flattened in order.
    pub fn samples(&self) -> impl Iterator<Item = &'a Sample> + 'a {
        self.strokes().flat_map(|s| s.samples.iter())
    }

    pub fn committed(&self) -> &'a [Stroke] {
        self.committed
    }

    pub fn live(&self) -> Option<&'a Stroke> {
        self.live
    }

    /// Number of strokes, counting the live stroke.
    pub fn stroke_count(&self) -> usize {
        self.committed.len() + usize::from(self.live.is_some())
    }

    /// Total number of samples across all counted strokes.
    pub fn sample_count(&self) -> usize {
        self.strokes().map(Stroke::len).sum()
    }
}

// ---------------------------------------------------------------------------
// StrokeCapture
// ---------------------------------------------------------------------------

/// Owns the completed strokes and the stroke being drawn.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    strokes: Vec<Stroke>,
    current: Stroke,
    drawing: bool,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new stroke, discarding any unfinished one.
    pub fn pointer_down(&mut self) {
        self.current = Stroke::new();
        self.drawing = true;
    }

    /// Record a sample on the active stroke. Returns `false` (and records
    /// nothing) when the pointer is not down.
    pub fn pointer_move(&mut self, sample: Sample) -> bool {
        if !self.drawing {
            return false;
        }
        self.current.push(sample);
        true
    }

    /// Seal the active stroke. Returns `true` when a non-empty stroke was
    /// committed.
    pub fn pointer_up(&mut self) -> bool {
        self.drawing = false;
        let stroke = std::mem::take(&mut self.current);
        if stroke.is_empty() {
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    /// Drop every stroke.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.current = Stroke::new();
        self.drawing = false;
    }

    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub const fn current(&self) -> &Stroke {
        &self.current
    }

    /// View of committed strokes plus the active stroke.
    pub fn live_gesture(&self) -> Option<Gesture<'_>> {
        Gesture::new(&self.strokes, Some(&self.current))
    }

    /// View of committed strokes only.
    pub fn committed_gesture(&self) -> Option<Gesture<'_>> {
        Gesture::new(&self.strokes, None)
    }
}

// ---------------------------------------------------------------------------
// Stroke files
// ---------------------------------------------------------------------------

/// Decode a JSON array of strokes, each an array of samples.
///
/// Empty strokes are dropped, matching what the capture store would have
/// committed. A document with no samples at all is an error.
pub fn parse_strokes(json: &str) -> Result<Vec<Stroke>, InputError> {
    let strokes: Vec<Stroke> = serde_json::from_str(json)?;
    for (si, stroke) in strokes.iter().enumerate() {
        if let Some(index) = stroke.samples.iter().position(|s| !is_finite_sample(s)) {
            return Err(InputError::NonFinite { stroke: si, index });
        }
    }
    let strokes: Vec<Stroke> = strokes.into_iter().filter(|s| !s.is_empty()).collect();
    if strokes.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(strokes)
}

fn is_finite_sample(s: &Sample) -> bool {
    s.x.is_finite() && s.y.is_finite() && s.t.is_finite() && s.pressure.map_or(true, f64::is_finite)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(Scalar, Scalar)]) -> Stroke {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Sample::new(x, y, i as Scalar * 10.0))
            .collect()
    }

    #[test]
    fn sample_pressure_defaults_to_half() {
        let s = Sample::new(1.0, 2.0, 0.0);
        assert!((s.pressure_or_default() - 0.5).abs() < 1e-12);
        assert!((s.with_pressure(0.8).pressure_or_default() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn sample_deserializes_without_pressure() {
        let s: Sample = serde_json::from_str(r#"{"x":1,"y":2,"t":3}"#).unwrap();
        assert_eq!(s, Sample::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn stroke_serializes_as_plain_array() {
        let s = stroke(&[(0.0, 0.0)]);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.starts_with('['), "unexpected json: {json}");
    }

    #[test]
    fn empty_gesture_is_rejected() {
        assert!(Gesture::new(&[], None).is_none());
        let empty = Stroke::new();
        assert!(Gesture::new(&[], Some(&empty)).is_none());
    }

    #[test]
    fn gesture_counts_live_stroke_only_when_non_empty() {
        let done = vec![stroke(&[(0.0, 0.0), (1.0, 1.0)])];
        let empty = Stroke::new();
        let g = Gesture::new(&done, Some(&empty)).unwrap();
        assert_eq!(g.stroke_count(), 1);
        assert!(g.live().is_none());

        let live = stroke(&[(5.0, 5.0)]);
        let g = Gesture::new(&done, Some(&live)).unwrap();
        assert_eq!(g.stroke_count(), 2);
        assert_eq!(g.sample_count(), 3);
        assert_eq!(g.samples().last().map(|s| s.x), Some(5.0));
    }

    #[test]
    fn capture_lifecycle() {
        let mut cap = StrokeCapture::new();
        assert!(!cap.pointer_move(Sample::new(0.0, 0.0, 0.0)));
        assert!(cap.live_gesture().is_none());

        cap.pointer_down();
        assert!(cap.pointer_move(Sample::new(0.0, 0.0, 0.0)));
        assert!(cap.pointer_move(Sample::new(3.0, 4.0, 16.0)));
        assert_eq!(cap.live_gesture().map(|g| g.sample_count()), Some(2));
        assert!(cap.committed_gesture().is_none());

        assert!(cap.pointer_up());
        assert_eq!(cap.strokes().len(), 1);
        assert!(cap.current().is_empty());
        assert!(!cap.is_drawing());
    }

    #[test]
    fn click_without_motion_commits_nothing() {
        let mut cap = StrokeCapture::new();
        cap.pointer_down();
        assert!(!cap.pointer_up());
        assert!(cap.strokes().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut cap = StrokeCapture::new();
        cap.pointer_down();
        cap.pointer_move(Sample::new(0.0, 0.0, 0.0));
        cap.pointer_up();
        cap.pointer_down();
        cap.pointer_move(Sample::new(1.0, 0.0, 0.0));
        cap.reset();
        assert!(cap.strokes().is_empty());
        assert!(cap.current().is_empty());
        assert!(!cap.is_drawing());
        assert!(cap.live_gesture().is_none());
    }

    #[test]
    fn parse_strokes_drops_empty_strokes() {
        let strokes =
            parse_strokes(r#"[[], [{"x":0,"y":0,"t":0}, {"x":1,"y":1,"t":8,"pressure":0.7}]]"#)
                .unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].len(), 2);
        assert_eq!(strokes[0].last().and_then(|s| s.pressure), Some(0.7));
    }

    #[test]
    fn parse_strokes_rejects_empty_documents() {
        assert!(matches!(parse_strokes("[]"), Err(InputError::Empty)));
        assert!(matches!(parse_strokes("[[],[]]"), Err(InputError::Empty)));
        assert!(matches!(parse_strokes("{"), Err(InputError::Parse(_))));
    }
}
