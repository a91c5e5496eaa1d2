//! End-to-end ticker scenarios driven without any terminal.

use std::ops::ControlFlow;
use std::time::Duration;

use ftick_core::{
    CellWidth, FrameLoop, LoopExit, Rect, StripLayout, Ticker, TickerConfig, TickerSession,
};

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn msgs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_input_shows_placeholder_everywhere() {
    let mut ticker = Ticker::with_cells(TickerConfig::cells(), Vec::new());
    ticker.relayout(&StripLayout::new(Rect::from_cells(0, 0, 62, 1), 3, 1.0));

    let session = ticker.session();
    assert!(session.rings().is_placeholder());
    for ring in session.rings().rings() {
        assert!(ring.iter().all(|e| session.rings().text(e) == "LOADING…"));
    }
    // 8 cells of text plus a 4 cell gap fills the 20 cell first window.
    assert_eq!(session.render_windows()[0], "LOADING…    LOADING…");
    assert!(session.threshold() >= 1.0);

    let frame = ticker.advance(Duration::from_secs(10)).unwrap();
    assert!(frame.threshold >= 1.0);
    assert!(frame.distance < frame.threshold);
}

#[test]
fn empty_input_with_unmeasured_items_still_terminates() {
    let config = TickerConfig {
        gap: 0.0,
        ..TickerConfig::default()
    };
    let mut session = TickerSession::new(config, &[], |_: &str| 0.0);
    assert_eq!(session.threshold(), 1.0);
    let frame = session.advance(Duration::from_secs(10)).unwrap();
    assert_eq!(frame.report.rotations, 400);
    assert_eq!(frame.threshold, 1.0);
}

#[test]
fn single_message_one_second_at_forty() {
    // Seven units wide with no gap: threshold 7, so 40 units owe 5 rotations.
    let config = TickerConfig {
        speed: 40.0,
        gap: 0.0,
        ..TickerConfig::default()
    };
    let mut session = TickerSession::new(config, &msgs(&["TIME 10:00"]), |_: &str| 7.0);
    let threshold = session.threshold();
    assert_eq!(threshold, 7.0);

    let mut advanced = 0.0;
    let mut rotations = 0u32;
    for _ in 0..60 {
        let frame = session.advance(FRAME).unwrap();
        advanced += frame.report.advanced;
        rotations += frame.report.rotations;
    }
    assert!((advanced - 40.0).abs() < 1e-3, "advanced {advanced}");
    assert_eq!(rotations, (40.0f64 / threshold).floor() as u32);
    assert!((session.distance() - (advanced - f64::from(rotations) * threshold)).abs() < 1e-9);
}

#[test]
fn single_message_with_default_gap_does_not_rotate_in_a_second() {
    let mut session = TickerSession::new(
        TickerConfig::default(),
        &msgs(&["TIME 10:00"]),
        CellWidth,
    );
    // 10 cells + 48 gap = 58 > 40.
    assert_eq!(session.threshold(), 58.0);
    let frame = session.advance(Duration::from_secs(1)).unwrap();
    assert!((frame.report.advanced - 40.0).abs() < 1e-9);
    assert_eq!(frame.report.rotations, 0);
    assert!((frame.distance - 40.0).abs() < 1e-9);
}

#[test]
fn message_change_rebuilds_rings_and_resets_distance() {
    let config = TickerConfig {
        speed: 30.0,
        gap: 2.0,
        repeats: 3,
        ..TickerConfig::default()
    };
    let mut ticker = Ticker::with_cells(config, msgs(&["ALPHA", "BETA", "GAMMA"]));
    for _ in 0..45 {
        ticker.advance(FRAME);
    }
    assert!(ticker.session().rings().rotations() > 0);
    let old_token = ticker.session().cancellation_token();

    let next = msgs(&["ONE", "TWO"]);
    assert!(ticker.set_messages(next.clone()));

    let session = ticker.session();
    assert!(old_token.is_cancelled());
    assert_eq!(session.distance(), 0.0);
    assert_eq!(session.rings().rotations(), 0);
    assert_eq!(session.threshold(), 5.0);
    for ring in session.rings().rings() {
        assert_eq!(ring.len(), 3 * next.len());
        assert_eq!(ring.head(), 0);
        for element in ring.iter() {
            assert!(next.iter().any(|m| m == session.rings().text(element)));
        }
    }
    let lines = session.render_windows();
    assert!(lines.iter().all(|l| !l.contains("ALPHA") && !l.contains("BETA")));
}

#[test]
fn frame_loop_drives_session_until_cancelled() {
    let mut session = TickerSession::new(TickerConfig::cells(), &msgs(&["HELLO"]), CellWidth);
    let token = session.cancellation_token();
    let mut frames = 0;
    let exit = FrameLoop::new(Duration::ZERO).run(&token, |now| {
        assert!(session.frame(now).is_some());
        frames += 1;
        if frames == 5 {
            session.cancel();
        }
        ControlFlow::Continue(())
    });
    assert_eq!(exit, LoopExit::Cancelled { frames: 5 });
    assert!(session.advance(FRAME).is_none());
}

#[test]
fn resize_mid_animation_keeps_distance() {
    let mut ticker = Ticker::with_cells(TickerConfig::cells(), msgs(&["A LONG ENOUGH MESSAGE"]));
    ticker.relayout(&StripLayout::new(Rect::from_cells(0, 0, 90, 1), 3, 2.0));
    ticker.advance(Duration::from_millis(500));
    let distance = ticker.session().distance();

    assert!(ticker.relayout(&StripLayout::new(Rect::from_cells(0, 0, 40, 1), 3, 2.0)));
    assert_eq!(ticker.session().distance(), distance);
    assert_eq!(ticker.geometry().offsets(), &[0.0, 14.0, 28.0]);
}
