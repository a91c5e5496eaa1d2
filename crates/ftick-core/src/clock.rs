#![forbid(unsafe_code)]

//! Motion clock: constant-velocity stepping with threshold rotation.
//!
//! [`step`] is the whole motion model as a pure function over an explicit
//! [`MotionState`]. It advances the global distance by `dt * speed`, then
//! rotates the lane while the distance has passed the front element's
//! threshold. [`MotionClock`] wraps it with frame timestamps.
//!
//! # Invariants
//!
//! 1. After a step, `0 <= distance < threshold` (given a finite speed).
//! 2. The threshold used for the next comparison always comes from the
//!    rotation callback, so varying message widths are honoured.
//! 3. `dt` is floored to `min_step`; it is capped only if `max_step` is set.
//!
//! # Failure Modes
//!
//! - Zero or sub-frame deltas: floored to `min_step`.
//! - Thresholds below 1 (zero-width items): treated as 1.
//! - Negative or NaN speed: treated as 0 (no motion).
//! - Distances beyond [`SAFETY_BOUND`]: reduced modulo [`SAFETY_MODULUS`]
//!   before rotating. Unreachable while thresholds are sane.

use std::time::Duration;
use web_time::Instant;

/// Distance above which the safety modulo is applied.
pub const SAFETY_BOUND: f64 = 1.0e9;

/// Modulus used by the safety reduction.
pub const SAFETY_MODULUS: f64 = 1.0e6;

/// Default minimum frame step (one 60 Hz frame).
pub const DEFAULT_MIN_STEP: Duration = Duration::from_nanos(16_666_667);

/// Default scroll speed in display units per second.
pub const DEFAULT_SPEED: f64 = 40.0;

/// Tunables for stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Units per second.
    pub speed: f64,
    /// Smallest delta a step will use.
    pub min_step: Duration,
    /// Largest delta a step will use; `None` replays long pauses in full.
    pub max_step: Option<Duration>,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            min_step: DEFAULT_MIN_STEP,
            max_step: None,
        }
    }
}

impl MotionParams {
    /// Apply the floor (and optional cap) to a raw frame delta.
    #[must_use]
    pub fn effective_dt(&self, raw: Duration) -> Duration {
        let dt = raw.max(self.min_step);
        match self.max_step {
            Some(cap) => dt.min(cap.max(self.min_step)),
            None => dt,
        }
    }
}

/// Distance and threshold for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Units scrolled since the current front element entered.
    pub distance: f64,
    /// Width of the current front element plus gap.
    pub threshold: f64,
}

impl MotionState {
    /// Start at distance 0 with the given threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            distance: 0.0,
            threshold: threshold.max(1.0),
        }
    }
}

/// What one step did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Delta actually applied (after floor/cap).
    pub dt: Duration,
    /// Distance added by this step, before any reduction.
    pub advanced: f64,
    /// Rotations applied.
    pub rotations: u32,
    /// Whether the safety modulo fired.
    pub wrapped: bool,
}

/// Advance `state` by `dt`.
///
/// `rotate` must rotate every ring once and return the new threshold.
pub fn step(
    state: MotionState,
    dt: Duration,
    params: &MotionParams,
    mut rotate: impl FnMut() -> f64,
) -> (MotionState, StepReport) {
    let dt = params.effective_dt(dt);
    let speed = params.speed.max(0.0);
    let advanced = dt.as_secs_f64() * speed;

    let mut distance = state.distance + advanced;
    let mut wrapped = false;
    if !distance.is_finite() {
        distance = 0.0;
        wrapped = true;
    } else if distance > SAFETY_BOUND {
        distance %= SAFETY_MODULUS;
        wrapped = true;
    }

    let mut threshold = state.threshold.max(1.0);
    let mut rotations = 0u32;
    // A long pause may owe several rotations at once.
    while distance >= threshold {
        distance -= threshold;
        threshold = rotate().max(1.0);
        rotations = rotations.saturating_add(1);
    }

    (
        MotionState {
            distance,
            threshold,
        },
        StepReport {
            dt,
            advanced,
            rotations,
            wrapped,
        },
    )
}

/// [`step`] driven by frame timestamps.
#[derive(Debug, Clone)]
pub struct MotionClock {
    state: MotionState,
    params: MotionParams,
    last_frame: Option<Instant>,
}

impl MotionClock {
    #[must_use]
    pub fn new(params: MotionParams, threshold: f64) -> Self {
        Self {
            state: MotionState::new(threshold),
            params,
            last_frame: None,
        }
    }

    /// Time since the previous frame; zero on the first frame.
    pub fn elapsed_since_last(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |prev| now.saturating_duration_since(prev));
        self.last_frame = Some(now);
        elapsed
    }

    /// Step for the frame at `now`.
    pub fn tick(&mut self, now: Instant, rotate: impl FnMut() -> f64) -> StepReport {
        let dt = self.elapsed_since_last(now);
        self.advance(dt, rotate)
    }

    /// Step by an explicit delta.
    pub fn advance(&mut self, dt: Duration, rotate: impl FnMut() -> f64) -> StepReport {
        let (next, report) = step(self.state, dt, &self.params, rotate);
        self.state = next;
        #[cfg(feature = "tracing")]
        if report.wrapped {
            tracing::warn!(
                advanced = report.advanced,
                distance = next.distance,
                "lane distance reduced by safety modulo"
            );
        }
        report
    }

    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.state.distance
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.state.threshold
    }

    #[inline]
    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Change speed without disturbing distance or threshold.
    pub fn set_speed(&mut self, speed: f64) {
        self.params.speed = speed;
    }
}
