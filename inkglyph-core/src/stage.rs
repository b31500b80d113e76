//! Staged disclosure.
//!
//! While a gesture is in progress only part of the form is shown. The stage
//! grows with the number of strokes and with the amount of ink laid down;
//! at stage 4 the direction of the live stroke decides whether the final
//! consonant shows its vertical alone or both legs.

use inkglyph_graphics::types::Scalar;

use crate::config::CommitReveal;
use crate::stroke::Stroke;

/// Displacement a stroke needs before it has a direction.
const MIN_DISPLACEMENT: Scalar = 4.0;

/// Sample totals at which the ink stage reaches 2, 3 and 4.
const INK_THRESHOLDS: [usize; 3] = [25, 61, 111];

pub const MAX_STAGE: u8 = 4;

/// Coarse direction of a stroke from its first to its last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Mostly vertical, moving down (y grows downward).
    VerticalDown,
    /// Mostly horizontal, moving right.
    HorizontalRight,
    Other,
    /// The stroke has no samples.
    None,
}

impl Orientation {
    pub fn of(stroke: &Stroke) -> Self {
        let (Some(first), Some(last)) = (stroke.first(), stroke.last()) else {
            return Self::None;
        };
        let dx = last.x - first.x;
        let dy = last.y - first.y;
        let (ax, ay) = (dx.abs(), dy.abs());
        if ay > ax && dy > MIN_DISPLACEMENT {
            Self::VerticalDown
        } else if ax > ay && dx > MIN_DISPLACEMENT {
            Self::HorizontalRight
        } else {
            Self::Other
        }
    }
}

/// How much of the final consonant is shown at stage 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum JongSub {
    Hidden = 0,
    VerticalOnly = 1,
    Full = 2,
}

impl JongSub {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A separately revealed part of the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    ChoTop,
    ChoCircle,
    Jung,
    JongVertical,
    JongHorizontal,
}

/// What the renderer may draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disclosure {
    /// 0 before any stroke, then 1..=4.
    pub stage: u8,
    /// [`JongSub::Hidden`] below stage 4.
    pub jong_sub: JongSub,
}

impl Disclosure {
    pub const NONE: Self = Self {
        stage: 0,
        jong_sub: JongSub::Hidden,
    };

    pub const COMPLETE: Self = Self {
        stage: MAX_STAGE,
        jong_sub: JongSub::Full,
    };

    /// Whether `component` is unlocked.
    pub fn reveals(&self, component: Component) -> bool {
        match component {
            Component::ChoTop => self.stage >= 1,
            Component::ChoCircle => self.stage >= 2,
            Component::Jung => self.stage >= 3,
            Component::JongVertical => {
                self.stage >= MAX_STAGE && self.jong_sub >= JongSub::VerticalOnly
            }
            Component::JongHorizontal => self.stage >= MAX_STAGE && self.jong_sub == JongSub::Full,
        }
    }
}

/// Stage earned by the committed strokes plus the live stroke.
///
/// 0 only when nothing has been drawn. A live stroke counts toward the
/// stroke total once it has a sample.
pub fn stage(committed: &[Stroke], live: Option<&Stroke>) -> u8 {
    let live = live.filter(|s| !s.is_empty());
    let strokes = committed.len() + usize::from(live.is_some());
    let ink: usize = committed.iter().map(Stroke::len).sum::<usize>() + live.map_or(0, Stroke::len);
    if ink == 0 {
        return 0;
    }
    let by_strokes = strokes.clamp(1, usize::from(MAX_STAGE));
    let by_ink = 1 + INK_THRESHOLDS.iter().filter(|&&t| ink >= t).count();
    u8::try_from(by_strokes.max(by_ink)).map_or(MAX_STAGE, |s| s.min(MAX_STAGE))
}

/// Disclosure while a gesture is being drawn.
pub fn classify(committed: &[Stroke], live: Option<&Stroke>) -> Disclosure {
    let stage = stage(committed, live);
    let jong_sub = if stage < MAX_STAGE {
        JongSub::Hidden
    } else if live.map(Orientation::of) == Some(Orientation::VerticalDown) {
        JongSub::VerticalOnly
    } else {
        JongSub::Full
    };
    Disclosure { stage, jong_sub }
}

/// Disclosure once the latest stroke has been committed.
pub fn committed(strokes: &[Stroke], reveal: CommitReveal) -> Disclosure {
    match reveal {
        CommitReveal::Full => Disclosure::COMPLETE,
        CommitReveal::Staged => {
            let stage = stage(strokes, None);
            let jong_sub = if stage >= MAX_STAGE {
                JongSub::Full
            } else {
                JongSub::Hidden
            };
            Disclosure { stage, jong_sub }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
