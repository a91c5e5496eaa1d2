//! Raw-mode terminal guard.
//!
//! # Invariants
//!
//! 1. Entering enables raw mode first and hides the cursor last; leaving
//!    undoes each step in reverse order.
//! 2. Cleanup runs from [`Drop`], so it also runs while unwinding a panic.
//! 3. A panic hook restores the terminal before the panic message prints.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, execute, terminal};

/// Owns raw mode and the alternate screen for its lifetime.
#[derive(Debug)]
pub struct TerminalGuard {
    alternate_screen: bool,
    raw_mode: bool,
}

impl TerminalGuard {
    /// Enter raw mode, switch to the alternate screen and hide the cursor.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            alternate_screen: false,
            raw_mode: true,
        };
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        guard.alternate_screen = true;
        tracing::info!("terminal raw mode enabled");
        Ok(guard)
    }

    /// Current terminal size as `(cols, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
        }
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
            tracing::info!("terminal raw mode disabled");
        }
        let _ = stdout.flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            let _ = stdout.flush();
            previous(info);
        }));
    });
}
