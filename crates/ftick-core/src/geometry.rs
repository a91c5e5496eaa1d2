#![forbid(unsafe_code)]

//! Window geometry: bounds, layout sources, and offset tracking.
//!
//! Every window samples the same lane, shifted by its horizontal distance
//! from the shared container. [`GeometryTracker`] measures those distances
//! from a [`LayoutSource`] and publishes them as a [`GeometrySnapshot`], which
//! the session reads on the next frame.
//!
//! # Invariants
//!
//! 1. `offset[i] = max(0, round(window[i].left - container.left))`.
//! 2. A window the source cannot report has offset 0 and width 0.
//! 3. Measuring the same layout twice yields identical snapshots.

/// An axis-aligned rectangle in display units (pixels or terminal cells).
///
/// Origin at top-left. Only the horizontal extent matters to the ticker;
/// the vertical fields are carried for hosts that lay out in 2D.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from terminal cell coordinates.
    #[inline]
    pub fn from_cells(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self::new(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        )
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Check if the rectangle has no horizontal extent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width.is_nan() || self.width <= 0.0
    }
}

/// Something that can report where the container and each window sit.
///
/// Returning `None` means "not laid out yet"; the tracker treats it as 0.
pub trait LayoutSource {
    /// Bounds of the shared container that defines the lane origin.
    fn container(&self) -> Option<Rect>;

    /// Bounds of window `index`.
    fn window(&self, index: usize) -> Option<Rect>;
}

/// Published per-window offsets and widths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometrySnapshot {
    offsets: Vec<f64>,
    widths: Vec<f64>,
}

impl GeometrySnapshot {
    /// A snapshot for `count` windows that have not been measured.
    #[must_use]
    pub fn zeroed(count: usize) -> Self {
        Self {
            offsets: vec![0.0; count],
            widths: vec![0.0; count],
        }
    }

    /// Build a snapshot from explicit offsets, with unknown widths.
    #[must_use]
    pub fn from_offsets(offsets: Vec<f64>) -> Self {
        let widths = vec![0.0; offsets.len()];
        Self { offsets, widths }
    }

    /// Number of windows described.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of window `index`; 0 for windows this snapshot does not cover.
    #[inline]
    pub fn offset(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }

    /// Width of window `index`; 0 for windows this snapshot does not cover.
    #[inline]
    pub fn width(&self, index: usize) -> f64 {
        self.widths.get(index).copied().unwrap_or(0.0)
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }
}

/// Measures window offsets and remembers the last published snapshot.
#[derive(Debug, Clone)]
pub struct GeometryTracker {
    window_count: usize,
    snapshot: GeometrySnapshot,
    generation: u64,
}

impl GeometryTracker {
    /// Create a tracker for `window_count` windows, all at offset 0.
    #[must_use]
    pub fn new(window_count: usize) -> Self {
        Self {
            window_count,
            snapshot: GeometrySnapshot::zeroed(window_count),
            generation: 0,
        }
    }

    #[inline]
    pub fn window_count(&self) -> usize {
        self.window_count
    }

    /// Measure the current layout without publishing it.
    #[must_use]
    pub fn measure(&self, source: &impl LayoutSource) -> GeometrySnapshot {
        let base = source.container().map_or(0.0, |c| c.left());
        let mut offsets = Vec::with_capacity(self.window_count);
        let mut widths = Vec::with_capacity(self.window_count);
        for index in 0..self.window_count {
            match source.window(index) {
                Some(rect) => {
                    // f64::max discards NaN, so degenerate bounds land on 0.
                    offsets.push((rect.left() - base).round().max(0.0));
                    widths.push(rect.width.max(0.0));
                }
                None => {
                    offsets.push(0.0);
                    widths.push(0.0);
                }
            }
        }
        GeometrySnapshot { offsets, widths }
    }

    /// Re-measure and publish. Returns `true` if the snapshot changed.
    pub fn update(&mut self, source: &impl LayoutSource) -> bool {
        let next = self.measure(source);
        if next == self.snapshot {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            generation = self.generation + 1,
            offsets = ?next.offsets(),
            "window geometry changed"
        );
        self.snapshot = next;
        self.generation += 1;
        true
    }

    /// The last published snapshot.
    #[inline]
    pub fn snapshot(&self) -> &GeometrySnapshot {
        &self.snapshot
    }

    /// How many times the published snapshot has changed.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A container split into equal-width columns, the dashboard's ticker row.
#[derive(Debug, Clone, PartialEq)]
pub struct StripLayout {
    container: Rect,
    windows: Vec<Rect>,
}

impl StripLayout {
    /// Split `container` into `count` columns separated by `gap` units.
    ///
    /// Column widths are floored to whole units; the last column absorbs the
    /// remainder. Columns never have negative width.
    #[must_use]
    pub fn new(container: Rect, count: usize, gap: f64) -> Self {
        let mut windows = Vec::with_capacity(count);
        if count > 0 {
            let gap = gap.max(0.0);
            let gaps = gap * (count - 1) as f64;
            let usable = (container.width - gaps).max(0.0);
            let column = (usable / count as f64).floor();
            let mut x = container.x;
            for index in 0..count {
                let width = if index + 1 == count {
                    (container.right() - x).max(0.0)
                } else {
                    column
                };
                windows.push(Rect::new(x, container.y, width, container.height));
                x += column + gap;
            }
        }
        Self { container, windows }
    }

    pub fn windows(&self) -> &[Rect] {
        &self.windows
    }
}

impl LayoutSource for StripLayout {
    fn container(&self) -> Option<Rect> {
        Some(self.container)
    }

    fn window(&self, index: usize) -> Option<Rect> {
        self.windows.get(index).copied()
    }
}

/// A fixed layout, useful when the host already knows every bound.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticLayout {
    pub container: Option<Rect>,
    pub windows: Vec<Option<Rect>>,
}

impl LayoutSource for StaticLayout {
    fn container(&self) -> Option<Rect> {
        self.container
    }

    fn window(&self, index: usize) -> Option<Rect> {
        self.windows.get(index).copied().flatten()
    }
}
