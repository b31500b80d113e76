//! The parameter panel collaborator.
//!
//! After every pipeline run the session hands the raw features, the
//! resolved form and its disclosure to a [`Panel`]. [`BarPanel`] is the bundled implementation:
//! two sorted tables of formatted values, each with a fill ratio normalized
//! against the running range of that key.

use std::collections::BTreeMap;
use std::fmt;

use inkglyph_graphics::math::{constrain, finite_or, round_half_up};
use inkglyph_graphics::types::Scalar;

use crate::features::GestureFeatures;
use crate::form::Form;
use crate::stage::Disclosure;

/// A flattened panel value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Number(Scalar),
    Text(&'static str),
}

impl fmt::Display for ParamValue {
    /// Numbers are rounded to three decimals and printed without trailing
    /// zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Number(v) => {
                let rounded = round_half_up(v * 1000.0) / 1000.0;
                if rounded == 0.0 {
                    f.write_str("0")
                } else {
                    write!(f, "{rounded}")
                }
            }
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Receives the output of each pipeline run.
pub trait Panel {
    fn render(&mut self, features: &GestureFeatures, form: &Form, disclosure: &Disclosure);
    /// Clear and hide the panel until the next render.
    fn hide(&mut self);
}

/// The output table: form parameters plus the disclosure state, sorted by
/// key.
pub fn output_entries(form: &Form, disclosure: &Disclosure) -> Vec<(&'static str, ParamValue)> {
    let mut out = form.entries();
    out.push(("jong_sub", ParamValue::Number(Scalar::from(disclosure.jong_sub.as_u8()))));
    out.push(("stage", ParamValue::Number(Scalar::from(disclosure.stage))));
    out.sort_by(|a, b| a.0.cmp(b.0));
    out
}

/// A panel that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPanel;

impl Panel for NullPanel {
    fn render(&mut self, _: &GestureFeatures, _: &Form, _: &Disclosure) {}
    fn hide(&mut self) {}
}

// ---------------------------------------------------------------------------
// Range tracking
// ---------------------------------------------------------------------------

const RANGE_PAD_RATIO: Scalar = 0.25;
const RANGE_PAD_MIN: Scalar = 1e-6;

/// Per-key running min/max used to normalize bar fills.
#[derive(Debug, Clone, Default)]
pub struct RangeTracker {
    ranges: BTreeMap<&'static str, (Scalar, Scalar)>,
}

impl RangeTracker {
    /// Fill ratio of `value` within the key's range, widening the range to
    /// include it. A key seen for the first time gets a range padded by a
    /// quarter of its magnitude. Non-finite values fill nothing and leave
    /// the range alone.
    pub fn normalize(&mut self, key: &'static str, value: Scalar) -> Scalar {
        if !value.is_finite() {
            return 0.0;
        }
        let range = self.ranges.entry(key).or_insert_with(|| {
            let pad = value.abs() * RANGE_PAD_RATIO + RANGE_PAD_MIN;
            (value - pad, value + pad)
        });
        range.0 = range.0.min(value);
        range.1 = range.1.max(value);
        let span = range.1 - range.0;
        let span = if span == 0.0 { RANGE_PAD_MIN } else { span };
        constrain((value - range.0) / span, 0.0, 1.0)
    }

    pub fn range(&self, key: &str) -> Option<(Scalar, Scalar)> {
        self.ranges.get(key).copied()
    }
}

// ---------------------------------------------------------------------------
// BarPanel
// ---------------------------------------------------------------------------

/// One rendered panel row.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub key: &'static str,
    pub value: String,
    /// Bar fill in [0, 1].
    pub fill: Scalar,
}

/// Two-table panel: gesture input on one side, form output on the other.
///
/// Ranges persist for the panel's lifetime, so bars compare each gesture
/// against everything seen before it.
#[derive(Debug, Clone, Default)]
pub struct BarPanel {
    gesture_ranges: RangeTracker,
    form_ranges: RangeTracker,
    gesture_rows: Vec<PanelRow>,
    form_rows: Vec<PanelRow>,
    visible: bool,
}

impl BarPanel {
    pub const GESTURE_TITLE: &'static str = "GESTURE (INPUT)";
    pub const FORM_TITLE: &'static str = "FORM (OUTPUT)";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture_rows(&self) -> &[PanelRow] {
        &self.gesture_rows
    }

    pub fn form_rows(&self) -> &[PanelRow] {
        &self.form_rows
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Plain-text rendering of both tables, empty while hidden.
    pub fn to_text(&self) -> String {
        if !self.visible {
            return String::new();
        }
        let mut out = String::new();
        for (title, rows) in [
            (Self::GESTURE_TITLE, &self.gesture_rows),
            (Self::FORM_TITLE, &self.form_rows),
        ] {
            out.push_str(title);
            out.push('\n');
            for row in rows {
                let filled = bar_cells(row.fill);
                out.push_str(&format!(
                    "  {:<22} {:>10} |{:<20}|\n",
                    row.key,
                    row.value,
                    "#".repeat(filled)
                ));
            }
        }
        out
    }
}

/// Cells in a text bar.
const BAR_CELLS: Scalar = 20.0;

/// Text bar width for a fill ratio.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the product is clamped to [0, BAR_CELLS]"
)]
fn bar_cells(fill: Scalar) -> usize {
    (constrain(finite_or(fill, 0.0), 0.0, 1.0) * BAR_CELLS).round() as usize
}

fn rows(
    entries: impl IntoIterator<Item = (&'static str, ParamValue)>,
    ranges: &mut RangeTracker,
) -> Vec<PanelRow> {
    entries
        .into_iter()
        .map(|(key, value)| PanelRow {
            key,
            value: value.to_string(),
            fill: match value {
                ParamValue::Number(v) => ranges.normalize(key, v),
                ParamValue::Text(_) => 0.0,
            },
        })
        .collect()
}

impl Panel for BarPanel {
    fn render(&mut self, features: &GestureFeatures, form: &Form, disclosure: &Disclosure) {
        let gesture = features
            .entries()
            .into_iter()
            .map(|(k, v)| (k, ParamValue::Number(v)));
        self.gesture_rows = rows(gesture, &mut self.gesture_ranges);
        self.form_rows = rows(output_entries(form, disclosure), &mut self.form_ranges);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.gesture_rows.clear();
        self.form_rows.clear();
        self.visible = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
