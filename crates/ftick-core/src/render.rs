#![forbid(unsafe_code)]

//! Cell rendering of one window's slice of the lane.
//!
//! The lane is laid out from the ring's front element at lane coordinate 0.
//! Each item occupies its threshold (`round(width + gap)`, at least 1) and
//! draws its text at the start of that span; the rest of the span is blank.
//! Because rotation subtracts exactly that threshold from the distance, the
//! picture does not jump when an item is retired.
//!
//! Output is always exactly `width` cells. Graphemes cut by either window
//! edge become blanks, so wide glyphs never straddle a border.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::measure::Measure;
use crate::ring::{Ring, RingSet, clamp_threshold};

/// Render `width` cells of `ring`, starting at lane coordinate `lane_start`.
///
/// Text comes from `set`; item spans come from `measure` and `gap`, the same
/// inputs the rotation threshold uses.
pub fn render_lane(
    set: &RingSet,
    ring: &Ring,
    measure: &impl Measure,
    gap: f64,
    lane_start: f64,
    width: usize,
) -> String {
    let mut out = String::with_capacity(width);
    // `as` saturates and maps NaN to 0.
    let start = lane_start.floor() as i64;
    let end = start.saturating_add(width as i64);
    let mut cursor = start;

    let mut item_start = 0i64;
    for element in ring.cycle() {
        if item_start >= end {
            break;
        }
        let text = set.text(element);
        let text_width = measure.width(text);
        let advance = clamp_threshold(text_width, gap) as i64;
        let item_end = item_start + advance;
        if item_end > start {
            let text_end = item_start + (text_width.round() as i64).clamp(0, advance);
            let mut x = item_start;
            for grapheme in text.graphemes(true) {
                let cells = grapheme.width() as i64;
                if cells == 0 {
                    continue;
                }
                if x + cells > text_end || x >= end {
                    break;
                }
                if x >= start && x + cells <= end {
                    pad_to(&mut out, &mut cursor, x);
                    out.push_str(grapheme);
                    cursor = x + cells;
                }
                x += cells;
            }
        }
        item_start = item_end;
    }

    pad_to(&mut out, &mut cursor, end);
    out
}

fn pad_to(out: &mut String, cursor: &mut i64, target: i64) {
    while *cursor < target {
        out.push(' ');
        *cursor += 1;
    }
}
