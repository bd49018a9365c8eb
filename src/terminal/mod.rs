//! Hosting the canvas in the terminal.
//!
//! The canvas needs raw mode for single keystrokes, the alternate screen so
//! the phone frame does not scroll the user's shell, and mouse capture with
//! motion reporting for hover and author-mode drags. [`TerminalManager`]
//! turns all three on and [`TerminalGuard`] turns them off again, once,
//! whether the session ends normally or by panic.
//!
//! ```no_run
//! use tapcanvas::terminal::{install_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     install_panic_hook();
//!     let mut manager = TerminalManager::new()?;
//!     manager.terminal().draw(|_frame| {})?;
//!     Ok(())
//! }
//! ```

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::panic;
use tracing::error;

/// Switch `writer` to the alternate screen and start reporting mouse
/// presses, drags and motion.
pub fn enter_canvas_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableMouseCapture)
}

/// Stop mouse reporting, leave the alternate screen and raw mode, show the
/// cursor. Errors are ignored so this can run from a panic hook, and running
/// it twice is harmless.
pub fn leave_canvas_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, DisableMouseCapture, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Put the terminal back before the previous panic hook prints its report.
///
/// The report is also written to the log, since a panic mid-frame can leave
/// the visible one garbled. Install after `color_eyre::install`.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        leave_canvas_mode(&mut io::stdout());
        error!("tapcanvas panicked: {}", info);
        previous(info);
    }));
}

/// Restores the terminal once, on [`cleanup`](Self::cleanup) or drop.
pub struct TerminalGuard {
    cleaned_up: bool,
}

impl TerminalGuard {
    fn armed() -> Self {
        Self { cleaned_up: false }
    }

    /// Restore now. Later calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        leave_canvas_mode(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    /// Enter raw mode, the alternate screen and mouse capture.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        // Armed before anything else can fail.
        let guard = TerminalGuard::armed();
        let mut stdout = io::stdout();
        enter_canvas_mode(&mut stdout)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal before the manager is dropped.
    pub fn restore(&mut self) -> Result<()> {
        self.guard.cleanup();
        self.terminal.show_cursor()?;
        Ok(())
    }
}
