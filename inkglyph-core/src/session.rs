//! The interactive drawing session.
//!
//! [`Session`] wires the capture store, the frame throttle and the pure
//! pipeline (extract → synthesize → classify) together, and reports each
//! run to the injected [`Panel`]. The host drives it with pointer events
//! and one [`Session::tick`] per display frame.

use log::{debug, warn};

use crate::config::{Config, Mode};
use crate::counter::Counter;
use crate::features::{extract, GestureFeatures};
use crate::form::Form;
use crate::panel::Panel;
use crate::scheduler::FrameThrottle;
use crate::stage::{self, Disclosure};
use crate::stroke::{Gesture, Sample, StrokeCapture};
use crate::synth::synthesize_with;

/// The result of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub features: GestureFeatures,
    pub form: Form,
    pub disclosure: Disclosure,
    /// `true` when produced by a commit rather than a preview.
    pub committed: bool,
}

pub struct Session<C, P> {
    config: Config,
    capture: StrokeCapture,
    throttle: FrameThrottle,
    counter: C,
    panel: P,
    frame: Option<Frame>,
    runs: u64,
}

impl<C: Counter, P: Panel> Session<C, P> {
    pub fn new(config: Config, counter: C, panel: P) -> Self {
        Self {
            config,
            capture: StrokeCapture::new(),
            throttle: FrameThrottle::new(),
            counter,
            panel,
            frame: None,
            runs: 0,
        }
    }

    /// Start a new stroke.
    pub fn pointer_down(&mut self) {
        self.capture.pointer_down();
    }

    /// Record a sample. In preview mode this also requests a recompute on
    /// the next tick. Returns `false` when the pointer is not down.
    pub fn pointer_move(&mut self, sample: Sample) -> bool {
        if !self.capture.pointer_move(sample) {
            return false;
        }
        if self.config.mode == Mode::Preview {
            self.throttle.request();
        }
        true
    }

    /// Commit the active stroke and run the pipeline on the committed
    /// strokes. Any preview still scheduled is dropped.
    ///
    /// Returns `None` without running when nothing has been drawn.
    pub fn pointer_up(&mut self) -> Option<&Frame> {
        self.throttle.cancel();
        self.capture.pointer_up();
        let disclosure = stage::committed(self.capture.strokes(), self.config.commit_reveal);
        let gesture = self.capture.committed_gesture()?;
        let frame = run(&self.config, gesture, disclosure, true);
        self.publish(frame)
    }

    /// Run a scheduled preview, if any, against the current capture.
    pub fn tick(&mut self) -> Option<&Frame> {
        if !self.throttle.drain() {
            return None;
        }
        let disclosure = stage::classify(self.capture.strokes(), Some(self.capture.current()));
        let gesture = self.capture.live_gesture()?;
        let frame = run(&self.config, gesture, disclosure, false);
        self.publish(frame)
    }

    /// Finish the glyph: hide the panel, advance the counter and clear the
    /// capture. Returns the new counter total, or `None` if the counter
    /// failed.
    pub fn reset(&mut self) -> Option<u64> {
        self.panel.hide();
        let total = match self.counter.increment() {
            Ok(total) => Some(total),
            Err(err) => {
                warn!("visit counter not advanced: {err}");
                None
            }
        };
        self.throttle.cancel();
        self.capture.reset();
        self.frame = None;
        debug!("session reset, counter at {total:?}");
        total
    }

    /// The latest run's output, cleared by [`Session::reset`].
    pub const fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn capture(&self) -> &StrokeCapture {
        &self.capture
    }

    pub const fn throttle(&self) -> &FrameThrottle {
        &self.throttle
    }

    pub const fn counter(&self) -> &C {
        &self.counter
    }

    pub const fn panel(&self) -> &P {
        &self.panel
    }

    /// Pipeline runs since the session was created.
    pub const fn runs(&self) -> u64 {
        self.runs
    }

    fn publish(&mut self, frame: Frame) -> Option<&Frame> {
        self.panel.render(&frame.features, &frame.form, &frame.disclosure);
        self.runs += 1;
        self.frame = Some(frame);
        self.frame.as_ref()
    }
}

fn run(config: &Config, gesture: Gesture<'_>, disclosure: Disclosure, committed: bool) -> Frame {
    let features = extract(&gesture);
    let form = synthesize_with(&features, &config.layout);
    debug!(
        "{} run: {} strokes, {} samples, stage {} jong_sub {}, gap {}",
        if committed { "commit" } else { "preview" },
        gesture.stroke_count(),
        gesture.sample_count(),
        disclosure.stage,
        disclosure.jong_sub.as_u8(),
        form.target_gap,
    );
    Frame {
        features,
        form,
        disclosure,
        committed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommitReveal;
    use crate::counter::MemoryCounter;
    use crate::error::CounterError;
    use crate::panel::BarPanel;
    use crate::stage::JongSub;
    use inkglyph_graphics::types::Scalar;

    /// Panel that records how often it was called.
    #[derive(Debug, Default)]
    struct SpyPanel {
        renders: usize,
        hides: usize,
        last_strokes: Option<u32>,
        last_stage: Option<u8>,
    }

    impl Panel for SpyPanel {
        fn render(&mut self, features: &GestureFeatures, _: &Form, disclosure: &Disclosure) {
            self.renders += 1;
            self.last_strokes = Some(features.stroke_count);
            self.last_stage = Some(disclosure.stage);
        }
        fn hide(&mut self) {
            self.hides += 1;
        }
    }

    struct BrokenCounter;

    impl Counter for BrokenCounter {
        fn increment(&mut self) -> Result<u64, CounterError> {
            Err(CounterError::Corrupt("garbage".into()))
        }
        fn total(&self) -> Result<u64, CounterError> {
            Err(CounterError::Corrupt("garbage".into()))
        }
    }

    fn session(config: Config) -> Session<MemoryCounter, SpyPanel> {
        Session::new(config, MemoryCounter::default(), SpyPanel::default())
    }

    fn draw<C: Counter, P: Panel>(s: &mut Session<C, P>, n: usize, dx: Scalar, dy: Scalar) {
        s.pointer_down();
        for i in 0..n {
            let f = i as Scalar;
            s.pointer_move(Sample::new(10.0 + dx * f, 10.0 + dy * f, f * 16.0).with_pressure(0.5));
        }
    }

    #[test_log::test]
    fn zero_strokes_never_run_the_pipeline() {
        let mut s = session(Config::default());
        assert!(s.tick().is_none());
        s.pointer_down();
        assert!(s.tick().is_none());
        assert!(s.pointer_up().is_none());
        s.reset();
        assert!(s.tick().is_none());
        assert_eq!(s.panel().renders, 0);
        assert_eq!(s.runs(), 0);
    }

    #[test_log::test]
    fn preview_runs_once_per_tick() {
        let mut s = session(Config::default());
        draw(&mut s, 10, 5.0, 0.0);
        assert_eq!(s.throttle().coalesced(), 9);

        let frame = s.tick().copied().unwrap();
        assert!(!frame.committed);
        assert_eq!(frame.disclosure.stage, 1);
        assert_eq!(frame.features.stroke_count, 1);
        assert!(s.tick().is_none());
        assert_eq!(s.panel().renders, 1);
        assert_eq!(s.panel().last_stage, Some(1));
    }

    #[test_log::test]
    fn tick_reads_latest_capture_state() {
        let mut s = session(Config::default());
        s.pointer_down();
        s.pointer_move(Sample::new(0.0, 0.0, 0.0));
        s.pointer_move(Sample::new(50.0, 0.0, 16.0));
        s.pointer_move(Sample::new(100.0, 0.0, 32.0));
        let frame = s.tick().copied().unwrap();
        assert!((frame.features.stroke_duration - 32.0).abs() < 1e-12);
    }

    #[test_log::test]
    fn commit_reveals_everything_and_cancels_preview() {
        let mut s = session(Config::default());
        draw(&mut s, 5, 5.0, 0.0);
        assert!(s.throttle().is_pending());

        let frame = s.pointer_up().copied().unwrap();
        assert!(frame.committed);
        assert_eq!(frame.disclosure, Disclosure::COMPLETE);
        assert_eq!(s.panel().last_stage, Some(4));
        assert!(!s.throttle().is_pending());
        assert!(s.tick().is_none());
        assert_eq!(s.panel().renders, 1);
    }

    #[test_log::test]
    fn staged_commit_keeps_earned_stage() {
        let config = Config {
            commit_reveal: CommitReveal::Staged,
            ..Config::default()
        };
        let mut s = session(config);
        draw(&mut s, 5, 5.0, 0.0);
        let frame = s.pointer_up().copied().unwrap();
        assert_eq!(frame.disclosure.stage, 1);
        assert_eq!(frame.disclosure.jong_sub, JongSub::Hidden);
    }

    #[test_log::test]
    fn stable_mode_skips_previews() {
        let config = Config {
            mode: Mode::Stable,
            ..Config::default()
        };
        let mut s = session(config);
        draw(&mut s, 20, 3.0, 1.0);
        assert!(!s.throttle().is_pending());
        assert!(s.tick().is_none());
        assert!(s.pointer_up().is_some());
        assert_eq!(s.runs(), 1);
    }

    #[test_log::test]
    fn live_downward_stroke_at_stage_four() {
        let mut s = session(Config::default());
        for row in 0..3 {
            draw(&mut s, 8, 6.0, Scalar::from(row));
            s.pointer_up();
        }
        draw(&mut s, 8, 0.25, 5.0);
        let frame = s.tick().copied().unwrap();
        assert_eq!(frame.disclosure.stage, 4);
        assert_eq!(frame.disclosure.jong_sub, JongSub::VerticalOnly);
        assert_eq!(frame.features.stroke_count, 4);
    }

    #[test_log::test]
    fn click_after_strokes_recommits() {
        let mut s = session(Config::default());
        draw(&mut s, 5, 5.0, 0.0);
        s.pointer_up();
        s.pointer_down();
        let frame = s.pointer_up().copied().unwrap();
        assert_eq!(frame.features.stroke_count, 1);
        assert_eq!(s.runs(), 2);
    }

    #[test_log::test]
    fn reset_hides_panel_counts_and_clears() {
        let mut s = session(Config::default());
        draw(&mut s, 5, 5.0, 0.0);
        s.pointer_up();
        assert!(s.frame().is_some());

        assert_eq!(s.reset(), Some(1));
        assert_eq!(s.panel().hides, 1);
        assert!(s.frame().is_none());
        assert!(s.capture().strokes().is_empty());

        draw(&mut s, 5, 5.0, 0.0);
        s.pointer_up();
        assert_eq!(s.panel().last_strokes, Some(1));
        assert_eq!(s.reset(), Some(2));
    }

    #[test_log::test]
    fn reset_survives_counter_failure() {
        let mut s = Session::new(Config::default(), BrokenCounter, BarPanel::new());
        draw(&mut s, 5, 5.0, 0.0);
        s.pointer_up();
        assert!(s.panel().is_visible());

        assert_eq!(s.reset(), None);
        assert!(!s.panel().is_visible());
        assert!(s.capture().strokes().is_empty());
    }

    #[test_log::test]
    fn reset_drops_scheduled_preview() {
        let mut s = session(Config::default());
        draw(&mut s, 5, 5.0, 0.0);
        s.reset();
        assert!(s.tick().is_none());
    }
}
