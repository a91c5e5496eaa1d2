#![forbid(unsafe_code)]

//! Rendered-width measurement for lane items.

use unicode_width::UnicodeWidthStr;

/// Measures the rendered width of one message, in display units.
///
/// A width of `0.0` means the item has not been laid out yet. Callers never
/// divide by a width; thresholds derived from it are clamped to at least 1.
pub trait Measure {
    fn width(&self, text: &str) -> f64;
}

/// Terminal cell width. Wide (East Asian) glyphs count as two cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellWidth;

impl Measure for CellWidth {
    #[inline]
    fn width(&self, text: &str) -> f64 {
        text.width() as f64
    }
}

impl<F> Measure for F
where
    F: Fn(&str) -> f64,
{
    #[inline]
    fn width(&self, text: &str) -> f64 {
        self(text)
    }
}
