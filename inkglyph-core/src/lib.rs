//! Gesture-to-glyph pipeline.
//!
//! Raw pointer strokes are reduced to a [`GestureFeatures`] vector, mapped
//! to a constrained [`Form`], and gated by a staged [`Disclosure`] while the
//! gesture is still being drawn. [`Session`] drives the pipeline from
//! pointer events.

pub mod config;
pub mod counter;
pub mod error;
pub mod features;
pub mod form;
pub mod panel;
pub mod scheduler;
pub mod session;
pub mod stage;
pub mod stroke;
pub mod synth;

pub use config::{CommitReveal, Config, LayoutParams, Mode, RenderConfig};
pub use counter::{Counter, MemoryCounter};
pub use error::{ConfigError, CounterError, InputError};
pub use features::{extract, GestureFeatures};
pub use form::Form;
pub use panel::{BarPanel, NullPanel, Panel, ParamValue};
pub use session::{Frame, Session};
pub use stage::{Component, Disclosure, JongSub, Orientation};
pub use stroke::{parse_strokes, Gesture, Sample, Stroke, StrokeCapture};
pub use synth::{synthesize, synthesize_with};
