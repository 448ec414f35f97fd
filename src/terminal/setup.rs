//! Terminal setup and teardown functions.
//!
//! These are used by `TerminalManager` and by the panic hook.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter TUI mode.
///
/// Switches to the alternate screen, preserving the original terminal
/// content, and hides the cursor.
///
/// # Errors
///
/// Returns an error if any terminal commands fail.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, Hide)
}

/// Leave TUI mode and restore terminal to normal state.
///
/// Safe to call more than once; errors are ignored.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    // Disable raw mode first to allow normal terminal operation
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore terminal to a usable state after a panic or error.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}
