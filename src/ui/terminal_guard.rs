//! Raw mode and the alternate screen for the browser session.
//!
//! The screen is handed back exactly once, either when the guard drops or
//! from the panic hook, so a panic message lands on the normal screen.

use crossterm::cursor::{Hide, Show};
use crossterm::queue;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Browsing,
    Restored,
}

/// Owns the browser screen until dropped.
pub struct TerminalGuard {
    screen: Arc<Mutex<Screen>>,
}

impl TerminalGuard {
    fn browsing() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::Browsing)),
        }
    }

    fn install_panic_hook(&self) {
        let screen = Arc::clone(&self.screen);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_screen(&screen);
            default_hook(info);
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_screen(&self.screen);
    }
}

/// Leave the browser screen unless that already happened.
fn restore_screen(screen: &Mutex<Screen>) {
    let mut screen = screen.lock();
    if *screen == Screen::Restored {
        return;
    }
    *screen = Screen::Restored;
    let _ = disable_raw_mode();
    let _ = leave_screen(&mut io::stdout());
}

fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, EnterAlternateScreen, Clear(ClearType::All), Hide)?;
    out.flush()
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, LeaveAlternateScreen, Show)?;
    out.flush()
}

pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = enter_screen(&mut stdout) {
        let _ = disable_raw_mode();
        return Err(err);
    }

    let guard = TerminalGuard::browsing();
    guard.install_panic_hook();

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_switches_to_alternate_screen_and_hides_cursor() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();

        assert!(written.starts_with("\x1b[?1049h"));
        assert!(written.contains("\x1b[2J"));
        assert!(written.ends_with("\x1b[?25l"));
    }

    #[test]
    fn leave_returns_to_main_screen_and_shows_cursor() {
        let mut out = Vec::new();
        leave_screen(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?1049l\x1b[?25h");
    }

    #[test]
    fn restored_screen_is_left_alone() {
        let screen = Mutex::new(Screen::Restored);
        restore_screen(&screen);
        assert_eq!(*screen.lock(), Screen::Restored);
    }
}
