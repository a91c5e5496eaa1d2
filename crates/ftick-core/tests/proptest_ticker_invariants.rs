//! Property-based invariant tests for the ticker engine.
//!
//! ## Invariants
//!
//! 1. Continuity: every window shows exactly the slice of one wide lane that
//!    sits under it, whatever the layout and step history.
//! 2. Boundedness: ring length never changes; after each step
//!    `0 <= distance < threshold` and `threshold >= 1`.
//! 3. Rotation atomicity: every ring's head advances by exactly the step's
//!    rotation count (mod length), so all rings share one phase.
//! 4. Idempotent geometry: measuring an unchanged layout twice is identical.

use std::time::Duration;

use ftick_core::{
    CellWidth, GeometryTracker, Rect, StripLayout, Ticker, TickerConfig, render_lane,
};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_messages() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Z0-9:,. ]{0,12}", 0..6)
}

fn arb_config() -> impl Strategy<Value = TickerConfig> {
    (1.0f64..120.0, 0u8..6, 1usize..4, 1usize..5).prop_map(|(speed, gap, repeats, windows)| {
        TickerConfig {
            speed,
            gap: f64::from(gap),
            repeats,
            window_count: windows,
            ..TickerConfig::default()
        }
    })
}

fn arb_steps() -> impl Strategy<Value = Vec<Duration>> {
    prop::collection::vec((0u64..400).prop_map(Duration::from_millis), 1..40)
}

fn arb_strip() -> impl Strategy<Value = (u16, u16, u16)> {
    // (container x, container width, gap between windows)
    (0u16..30, 20u16..160, 0u16..5)
}

// ── 1. Continuity ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn windows_are_slices_of_one_lane(
        messages in arb_messages(),
        config in arb_config(),
        steps in arb_steps(),
        (x, width, window_gap) in arb_strip(),
    ) {
        let gap = config.gap;
        let count = config.window_count;
        let mut ticker = Ticker::with_cells(config, messages);
        let strip = StripLayout::new(Rect::from_cells(x, 0, width, 1), count, f64::from(window_gap));
        ticker.relayout(&strip);

        for dt in steps {
            ticker.advance(dt);
            let session = ticker.session();
            let lane = render_lane(
                session.rings(),
                session.rings().reference(),
                &CellWidth,
                gap,
                session.distance(),
                usize::from(width),
            );
            for (index, rect) in strip.windows().iter().enumerate() {
                let offset = (rect.x - f64::from(x)) as usize;
                let w = rect.width as usize;
                let shown = session.render_window(index, w).unwrap();
                // Every glyph used here is one cell wide, so chars are cells.
                let expected: String = lane.chars().skip(offset).take(w).collect();
                prop_assert_eq!(shown, expected, "window {}", index);
            }
        }
    }

    #[test]
    fn translations_differ_by_offset_difference(
        messages in arb_messages(),
        config in arb_config(),
        steps in arb_steps(),
        (x, width, window_gap) in arb_strip(),
    ) {
        let count = config.window_count;
        let mut ticker = Ticker::with_cells(config, messages);
        ticker.relayout(&StripLayout::new(Rect::from_cells(x, 0, width, 1), count, f64::from(window_gap)));
        let offsets = ticker.geometry().offsets().to_vec();
        for dt in steps {
            let frame = ticker.advance(dt).unwrap();
            for i in 0..count {
                for j in 0..count {
                    let lhs = frame.translations[j].x() - frame.translations[i].x();
                    prop_assert!((lhs - (offsets[i] - offsets[j])).abs() < 1e-9);
                }
            }
        }
    }
}

// ── 2. Boundedness ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn ring_length_and_distance_stay_bounded(
        messages in arb_messages(),
        config in arb_config(),
        steps in arb_steps(),
    ) {
        let expected_len = config.repeats * messages.len().max(1);
        let mut ticker = Ticker::with_cells(config, messages);
        for dt in steps {
            let frame = ticker.advance(dt).unwrap();
            prop_assert!(frame.threshold >= 1.0);
            prop_assert!(frame.distance >= 0.0);
            prop_assert!(frame.distance < frame.threshold, "{} >= {}", frame.distance, frame.threshold);
            for ring in ticker.session().rings().rings() {
                prop_assert_eq!(ring.len(), expected_len);
            }
        }
    }
}

// ── 3. Rotation atomicity ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn every_ring_advances_in_lockstep(
        messages in arb_messages(),
        config in arb_config(),
        steps in arb_steps(),
    ) {
        let mut ticker = Ticker::with_cells(config, messages);
        for dt in steps {
            let before = ticker.session().rings().reference().head();
            let len = ticker.session().rings().ring_len();
            let frame = ticker.advance(dt).unwrap();
            let expected = (before + frame.report.rotations as usize) % len;
            for ring in ticker.session().rings().rings() {
                prop_assert_eq!(ring.head(), expected);
            }
        }
    }
}

// ── 4. Idempotent geometry ────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn measuring_twice_is_identical(
        (x, width, window_gap) in arb_strip(),
        count in 1usize..6,
    ) {
        let strip = StripLayout::new(Rect::from_cells(x, 3, width, 2), count, f64::from(window_gap));
        let tracker = GeometryTracker::new(count);
        let first = tracker.measure(&strip);
        let second = tracker.measure(&strip);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.offsets().iter().all(|o| *o >= 0.0 && o.fract() == 0.0));
    }
}
