//! The terminal host: input, message refresh, and one draw per frame.
//!
//! [`App`] holds no terminal handle; [`run`] owns the terminal guard and the
//! frame loop, and feeds the app events, wall-clock time and an output sink.

use std::io::{self, BufWriter, Write};
use std::ops::ControlFlow;
use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ftick_core::{CancellationSource, CancellationToken, FrameLoop, Ticker, TickerConfig};
use web_time::Instant;

use crate::error::{HostError, Result};
use crate::messages::MessageSource;
use crate::screen::Screen;
use crate::terminal::TerminalGuard;

/// Factor applied per `+` / `-` press.
pub const SPEED_STEP: f64 = 1.25;

/// Slowest speed reachable with `-`, in cells per second.
pub const MIN_SPEED: f64 = 0.5;

/// Fastest speed reachable with `+`, in cells per second.
pub const MAX_SPEED: f64 = 400.0;

#[derive(Debug)]
pub struct App {
    ticker: Ticker,
    screen: Screen,
    source: MessageSource,
    minute: Option<(u32, u32)>,
    quit: CancellationSource,
    needs_clear: bool,
}

impl App {
    pub fn new(
        config: TickerConfig,
        source: MessageSource,
        size: (u16, u16),
        now: &DateTime<Local>,
    ) -> Self {
        let screen = Screen::new(size.0, size.1, config.window_count);
        let mut ticker = Ticker::with_cells(config, source.messages_at(now));
        ticker.relayout(&screen);
        Self {
            ticker,
            screen,
            minute: source.is_live().then(|| (now.hour(), now.minute())),
            source,
            quit: CancellationSource::new(),
            needs_clear: true,
        }
    }

    /// Token the frame loop waits on; cancelled when the user quits.
    pub fn quit_token(&self) -> CancellationToken {
        self.quit.token()
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.is_cancelled()
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// React to one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) => self.resize(cols, rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.request_quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_quit();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.scale_speed(SPEED_STEP);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.scale_speed(SPEED_STEP.recip());
            }
            _ => {}
        }
    }

    fn request_quit(&self) {
        if self.quit.cancel() {
            tracing::info!("quit requested");
        }
    }

    fn scale_speed(&mut self, factor: f64) {
        let speed = (self.ticker.config().speed * factor).clamp(MIN_SPEED, MAX_SPEED);
        self.ticker.set_speed(speed);
    }

    /// Lay the windows out for a new terminal size. Motion is untouched.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.screen.size() == (cols, rows) {
            return;
        }
        self.screen = Screen::new(cols, rows, self.ticker.config().window_count);
        self.ticker.relayout(&self.screen);
        self.needs_clear = true;
        tracing::debug!(cols, rows, "terminal resized");
    }

    /// Rebuild a clock-dependent message list when the minute rolls over.
    ///
    /// Returns `true` if the ticker was remounted.
    pub fn refresh_messages(&mut self, now: &DateTime<Local>) -> bool {
        if !self.source.is_live() {
            return false;
        }
        let minute = Some((now.hour(), now.minute()));
        if minute == self.minute {
            return false;
        }
        self.minute = minute;
        let remounted = self.ticker.set_messages(self.source.messages_at(now));
        if remounted {
            tracing::info!(
                messages = self.ticker.messages().len(),
                "message list changed"
            );
        }
        remounted
    }

    /// One status line, shown above the boxes.
    pub fn status_line(&self) -> String {
        format!(
            " FRANKENTICKER  {:.1} cells/s  {} windows  q quit  +/- speed",
            self.ticker.config().speed,
            self.ticker.config().window_count,
        )
    }

    /// Step the ticker for the frame at `now` and draw it.
    pub fn frame(&mut self, now: Instant, out: &mut impl Write) -> io::Result<()> {
        if self.needs_clear {
            self.screen.clear(out)?;
            self.needs_clear = false;
        }
        if self.ticker.frame(now).is_none() {
            return Ok(());
        }
        self.screen
            .draw(out, self.ticker.session(), &self.status_line())
    }
}

/// Forward every pending terminal event to `app` without blocking.
fn pump_events(app: &mut App) -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        app.handle_event(event::read()?);
    }
    Ok(())
}

/// Take over the terminal and scroll until the user quits.
pub fn run(config: TickerConfig, source: MessageSource, frame_loop: FrameLoop) -> Result<()> {
    let guard = TerminalGuard::enter()?;
    let size = guard.size()?;
    let mut app = App::new(config, source, size, &Local::now());
    let token = app.quit_token();
    let mut out = BufWriter::new(io::stdout());
    let mut failure: Option<HostError> = None;

    tracing::info!(
        cols = size.0,
        rows = size.1,
        interval_ms = frame_loop.interval().as_millis() as u64,
        "frame loop starting"
    );
    let exit = frame_loop.run(&token, |now| {
        let step = pump_events(&mut app).and_then(|()| {
            if app.is_quitting() {
                return Ok(());
            }
            app.refresh_messages(&Local::now());
            app.frame(now, &mut out)
        });
        match step {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                failure = Some(err.into());
                ControlFlow::Break(())
            }
        }
    });

    drop(guard);
    tracing::info!(frames = exit.frames(), "frame loop stopped");
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
