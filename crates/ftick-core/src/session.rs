#![forbid(unsafe_code)]

//! Ticker sessions and the mount that owns them.
//!
//! A [`TickerSession`] is the explicit state of one animation session:
//! rings, motion state, the published geometry, and a cancellation source.
//! It is built for one message list and never patched in place; a new list
//! means a new session.
//!
//! A [`Ticker`] is the long-lived mount. It keeps the geometry tracker
//! across sessions (resizes never reset motion) and swaps the session when
//! the message list actually changes.
//!
//! # Ordering
//!
//! A frame runs the whole motion step, including every rotation, before it
//! composes translations. Nothing observes rings mid-rotation.

use std::time::Duration;
use web_time::Instant;

use crate::cancellation::{CancellationSource, CancellationToken};
use crate::clock::{MotionClock, StepReport};
use crate::composer::{Frame, compose, translation};
use crate::config::TickerConfig;
use crate::geometry::{GeometrySnapshot, GeometryTracker, LayoutSource};
use crate::measure::{CellWidth, Measure};
use crate::render::render_lane;
use crate::ring::RingSet;

/// State of one animation session.
#[derive(Debug)]
pub struct TickerSession<M: Measure = CellWidth> {
    config: TickerConfig,
    rings: RingSet,
    clock: MotionClock,
    geometry: GeometrySnapshot,
    measure: M,
    cancel: CancellationSource,
}

impl<M: Measure> TickerSession<M> {
    /// Mount rings for `messages` and measure the first threshold.
    pub fn new(config: TickerConfig, messages: &[String], measure: M) -> Self {
        let window_count = config.window_count.max(1);
        let rings = RingSet::new(messages, &config.placeholder, config.repeats, window_count);
        let threshold = rings.current_threshold(&measure, config.gap);
        let clock = MotionClock::new(config.motion_params(), threshold);
        #[cfg(feature = "tracing")]
        tracing::info!(
            messages = messages.len(),
            windows = window_count,
            ring_len = rings.ring_len(),
            threshold,
            placeholder = rings.is_placeholder(),
            "ticker session mounted"
        );
        Self {
            geometry: GeometrySnapshot::zeroed(window_count),
            config,
            rings,
            clock,
            measure,
            cancel: CancellationSource::new(),
        }
    }

    /// Step for the frame at `now` and compose it.
    ///
    /// The first frame of a session steps by the minimum delta. Returns
    /// `None` once the session is cancelled.
    pub fn frame(&mut self, now: Instant) -> Option<Frame> {
        if self.is_cancelled() {
            return None;
        }
        let (clock, rotate) = self.clock_and_rotation();
        let report = clock.tick(now, rotate);
        Some(self.compose_frame(report))
    }

    /// Step by an explicit delta and compose. `None` once cancelled.
    pub fn advance(&mut self, dt: Duration) -> Option<Frame> {
        if self.is_cancelled() {
            return None;
        }
        let (clock, rotate) = self.clock_and_rotation();
        let report = clock.advance(dt, rotate);
        Some(self.compose_frame(report))
    }

    /// The clock, plus a callback that rotates every ring once and returns
    /// the new threshold.
    fn clock_and_rotation(&mut self) -> (&mut MotionClock, impl FnMut() -> f64 + '_) {
        let Self {
            config,
            rings,
            clock,
            measure,
            ..
        } = self;
        let gap = config.gap;
        let rotate = move || {
            rings.rotate();
            rings.current_threshold(&*measure, gap)
        };
        (clock, rotate)
    }

    fn compose_frame(&self, report: StepReport) -> Frame {
        Frame {
            distance: self.clock.distance(),
            threshold: self.clock.threshold(),
            translations: compose(
                self.clock.distance(),
                &self.geometry,
                self.rings.window_count(),
            ),
            report,
        }
    }

    /// Publish new window offsets. Motion state is untouched.
    pub fn set_geometry(&mut self, geometry: GeometrySnapshot) {
        self.geometry = geometry;
    }

    #[inline]
    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.geometry
    }

    /// Stop this session. No frame is produced afterwards.
    pub fn cancel(&self) {
        if self.cancel.cancel() {
            #[cfg(feature = "tracing")]
            tracing::info!(rotations = self.rings.rotations(), "ticker session cancelled");
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token for a loop driving this session.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.token()
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.clock.distance()
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.clock.threshold()
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.clock.params().speed
    }

    /// Change speed for the rest of this session.
    pub fn set_speed(&mut self, speed: f64) {
        self.config.speed = speed;
        self.clock.set_speed(speed);
    }

    #[inline]
    pub fn rings(&self) -> &RingSet {
        &self.rings
    }

    /// The effective message list (placeholder when mounted empty).
    #[inline]
    pub fn messages(&self) -> &[String] {
        self.rings.messages()
    }

    #[inline]
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    #[inline]
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Cells visible in window `index` at the current distance.
    ///
    /// Returns `None` for a window this session has no ring for.
    pub fn render_window(&self, index: usize, width: usize) -> Option<String> {
        let ring = self.rings.ring(index)?;
        let lane_start = translation(self.distance(), &self.geometry, index).lane_position();
        Some(render_lane(
            &self.rings,
            ring,
            &self.measure,
            self.config.gap,
            lane_start,
            width,
        ))
    }

    /// Every window, each at the width the geometry snapshot reports.
    pub fn render_windows(&self) -> Vec<String> {
        (0..self.rings.window_count())
            .filter_map(|index| {
                let width = self.geometry.width(index).max(0.0).floor() as usize;
                self.render_window(index, width)
            })
            .collect()
    }
}

/// The long-lived mount: geometry tracking plus the current session.
#[derive(Debug)]
pub struct Ticker<M: Measure + Clone = CellWidth> {
    config: TickerConfig,
    measure: M,
    tracker: GeometryTracker,
    messages: Vec<String>,
    session: TickerSession<M>,
}

impl Ticker<CellWidth> {
    /// A ticker measuring in terminal cells.
    pub fn with_cells(config: TickerConfig, messages: Vec<String>) -> Self {
        Self::new(config, messages, CellWidth)
    }
}

impl<M: Measure + Clone> Ticker<M> {
    pub fn new(config: TickerConfig, messages: Vec<String>, measure: M) -> Self {
        let tracker = GeometryTracker::new(config.window_count.max(1));
        let session = TickerSession::new(config.clone(), &messages, measure.clone());
        Self {
            config,
            measure,
            tracker,
            messages,
            session,
        }
    }

    /// Replace the message list.
    ///
    /// An identical list is ignored, and so is any list once the ticker is
    /// stopped. Anything else cancels the running session and mounts a
    /// fresh one at distance 0, keeping geometry. Returns `true` if a
    /// remount happened.
    pub fn set_messages(&mut self, messages: Vec<String>) -> bool {
        if self.is_stopped() || messages == self.messages {
            return false;
        }
        self.session.cancel();
        let mut session = TickerSession::new(self.config.clone(), &messages, self.measure.clone());
        session.set_geometry(self.tracker.snapshot().clone());
        self.session = session;
        self.messages = messages;
        true
    }

    /// Re-measure the layout and publish offsets into the live session.
    ///
    /// Safe to call redundantly. Returns `true` if the offsets changed.
    pub fn relayout(&mut self, source: &impl LayoutSource) -> bool {
        let changed = self.tracker.update(source);
        if changed {
            self.session.set_geometry(self.tracker.snapshot().clone());
        }
        changed
    }

    /// Step and compose the frame at `now`. `None` once stopped.
    pub fn frame(&mut self, now: Instant) -> Option<Frame> {
        self.session.frame(now)
    }

    /// Step by an explicit delta. `None` once stopped.
    pub fn advance(&mut self, dt: Duration) -> Option<Frame> {
        self.session.advance(dt)
    }

    /// Change speed without remounting.
    pub fn set_speed(&mut self, speed: f64) {
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.config.speed, to = speed, "ticker speed changed");
        self.config.speed = speed;
        self.session.set_speed(speed);
    }

    /// Cancel the running session for good. No later call produces a frame.
    pub fn stop(&self) {
        self.session.cancel();
    }

    /// Whether the ticker has been stopped.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.session.is_cancelled()
    }

    #[inline]
    pub fn session(&self) -> &TickerSession<M> {
        &self.session
    }

    #[inline]
    pub fn geometry(&self) -> &GeometrySnapshot {
        self.tracker.snapshot()
    }

    /// The message list as supplied (before placeholder substitution).
    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[inline]
    pub fn config(&self) -> &TickerConfig {
        &self.config
    }
}
