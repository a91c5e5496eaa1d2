#![forbid(unsafe_code)]

//! Composer: per-window translations of the shared lane.
//!
//! Window `i` is translated by `-(distance) - offset[i]`. Its left edge
//! then samples the lane at `distance + offset[i]`, exactly where a single
//! strip spanning the whole container would be at that column. This is what
//! makes separately laid-out windows read as one continuous lane.

use std::fmt;

use crate::clock::StepReport;
use crate::geometry::GeometrySnapshot;

/// A horizontal-only translation, in display units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation(pub f64);

impl Translation {
    /// Signed horizontal shift.
    #[inline]
    pub const fn x(self) -> f64 {
        self.0
    }

    /// Lane coordinate sampled by the window's left edge.
    #[inline]
    pub fn lane_position(self) -> f64 {
        -self.0
    }

    /// Compositor-only CSS transform, e.g. `translate3d(-12.5px,0,0)`.
    #[must_use]
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}px,0,0)", self.0)
    }
}

/// Translation of window `index` at global `distance`.
#[must_use]
pub fn translation(distance: f64, geometry: &GeometrySnapshot, index: usize) -> Translation {
    let x = -distance - geometry.offset(index);
    // Normalise -0.0 so hosts never print "-0px".
    Translation(if x == 0.0 { 0.0 } else { x })
}

/// Translations for `window_count` windows at global `distance`.
#[must_use]
pub fn compose(distance: f64, geometry: &GeometrySnapshot, window_count: usize) -> Vec<Translation> {
    (0..window_count)
        .map(|index| translation(distance, geometry, index))
        .collect()
}

/// Everything a host needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Global distance after the step.
    pub distance: f64,
    /// Threshold for the current front element.
    pub threshold: f64,
    /// One translation per window.
    pub translations: Vec<Translation>,
    /// What the motion step did.
    pub report: StepReport,
}

impl Frame {
    #[inline]
    pub fn translation(&self, index: usize) -> Option<Translation> {
        self.translations.get(index).copied()
    }
}
