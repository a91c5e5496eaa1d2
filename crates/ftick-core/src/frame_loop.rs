#![forbid(unsafe_code)]

//! A cancellable, fixed-interval frame loop.
//!
//! [`FrameLoop::run`] calls its callback once per interval until the token
//! is cancelled or the callback breaks. The only suspension is the wait
//! between frames, and that wait ends as soon as the token is cancelled, so
//! no frame fires after cancellation.

use std::ops::ControlFlow;
use std::time::Duration;
use web_time::Instant;

use crate::cancellation::CancellationToken;

/// Default frame rate for hosts without a native refresh signal.
pub const DEFAULT_FPS: u32 = 60;

/// Why [`FrameLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The token was cancelled.
    Cancelled { frames: u64 },
    /// The callback returned [`ControlFlow::Break`].
    Stopped { frames: u64 },
}

impl LoopExit {
    /// Frames delivered before exit.
    pub fn frames(self) -> u64 {
        match self {
            Self::Cancelled { frames } | Self::Stopped { frames } => frames,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLoop {
    interval: Duration,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::from_fps(DEFAULT_FPS)
    }
}

impl FrameLoop {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Interval for `fps` frames per second; 0 is treated as 1.
    #[must_use]
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive `on_frame` until cancelled or stopped.
    pub fn run<F>(&self, token: &CancellationToken, mut on_frame: F) -> LoopExit
    where
        F: FnMut(Instant) -> ControlFlow<()>,
    {
        let mut frames = 0u64;
        loop {
            if token.is_cancelled() {
                return LoopExit::Cancelled { frames };
            }
            let started = Instant::now();
            let flow = on_frame(started);
            frames += 1;
            if flow.is_break() {
                return LoopExit::Stopped { frames };
            }
            let wait = self.interval.saturating_sub(started.elapsed());
            if token.wait_timeout(wait) {
                return LoopExit::Cancelled { frames };
            }
        }
    }
}
