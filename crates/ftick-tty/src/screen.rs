//! Screen layout and drawing.
//!
//! The ticker row is centred vertically: `N` bordered boxes split the width
//! between a one-cell margin on each side. Each box's single inner row is a
//! viewport onto the lane; the border cells between viewports hide the part
//! of the lane that falls between windows.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use ftick_core::{LayoutSource, Measure, Rect, StripLayout, TickerSession};
use unicode_width::UnicodeWidthChar;

/// Blank columns at each side of the screen.
pub const MARGIN: u16 = 1;

/// Blank columns between neighbouring boxes.
pub const BOX_GAP: u16 = 2;

const BOX_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    cols: u16,
    rows: u16,
    container: Rect,
    boxes: StripLayout,
}

impl Screen {
    pub fn new(cols: u16, rows: u16, window_count: usize) -> Self {
        let width = cols.saturating_sub(2 * MARGIN);
        let top = rows.saturating_sub(BOX_HEIGHT) / 2;
        let container = Rect::from_cells(MARGIN, top, width, BOX_HEIGHT);
        let boxes = StripLayout::new(container, window_count, f64::from(BOX_GAP));
        Self {
            cols,
            rows,
            container,
            boxes,
        }
    }

    #[inline]
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    #[inline]
    pub fn window_count(&self) -> usize {
        self.boxes.windows().len()
    }

    /// Outer bounds of box `index`, border included.
    pub fn box_rect(&self, index: usize) -> Option<Rect> {
        self.boxes.windows().get(index).copied()
    }

    /// The single row inside box `index` where the lane shows.
    pub fn viewport(&self, index: usize) -> Option<Rect> {
        let outer = self.box_rect(index)?;
        Some(Rect::new(
            outer.x + 1.0,
            outer.y + 1.0,
            (outer.width - 2.0).max(0.0),
            1.0,
        ))
    }

    /// Clear everything, e.g. after a resize.
    pub fn clear(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, Clear(ClearType::All))
    }

    /// Draw the status line, the boxes and each window's slice of the lane.
    pub fn draw<M: Measure>(
        &self,
        out: &mut impl Write,
        session: &TickerSession<M>,
        status: &str,
    ) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, 0),
            Print(fit(status, usize::from(self.cols)))
        )?;

        for index in 0..self.window_count() {
            if let Some(outer) = self.box_rect(index) {
                draw_box(out, outer)?;
            }
        }

        for (index, line) in session.render_windows().iter().enumerate() {
            let Some(view) = self.viewport(index) else {
                continue;
            };
            if view.is_empty() {
                continue;
            }
            queue!(out, MoveTo(cell(view.x), cell(view.y)), Print(line))?;
        }
        out.flush()
    }
}

impl LayoutSource for Screen {
    fn container(&self) -> Option<Rect> {
        Some(self.container)
    }

    fn window(&self, index: usize) -> Option<Rect> {
        self.viewport(index)
    }
}

fn draw_box(out: &mut impl Write, outer: Rect) -> io::Result<()> {
    let width = cell(outer.width);
    if width < 2 {
        return Ok(());
    }
    let (x, y) = (cell(outer.x), cell(outer.y));
    let inner = "─".repeat(usize::from(width - 2));
    queue!(
        out,
        MoveTo(x, y),
        Print(format!("┌{inner}┐")),
        MoveTo(x, y + 1),
        Print("│"),
        MoveTo(x + width - 1, y + 1),
        Print("│"),
        MoveTo(x, y + 2),
        Print(format!("└{inner}┘"))
    )
}

/// Pad or cut `text` to exactly `width` cells.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

// Layout values come from u16 cells, so the cast is exact.
fn cell(value: f64) -> u16 {
    value.max(0.0) as u16
}
