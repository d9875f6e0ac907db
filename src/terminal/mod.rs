//! crossterm-backed adapters
//!
//! Screen layout, top to bottom: the walled arena (one wall cell on every
//! side), then the status lines.

mod keys;
mod renderer;

pub use keys::{TerminalInput, decode_key};
pub use renderer::{TerminalRenderer, glyph};

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use crate::error::TerminalError;
use crate::sim::Arena;

/// Lines reserved under the arena
pub const STATUS_LINES: u16 = 2;

/// Columns and rows the screen needs for `arena`, saturating at `u16::MAX`
pub fn required_size(arena: Arena) -> (u16, u16) {
    let cols = walled_extent(arena.cols);
    let rows = walled_extent(arena.rows).saturating_add(STATUS_LINES);
    (cols, rows)
}

fn walled_extent(cells: i32) -> u16 {
    u16::try_from(cells.saturating_add(2).max(0)).unwrap_or(u16::MAX)
}

/// Check a terminal of `size` (columns, rows) can show `arena`
pub fn check_fits(arena: Arena, size: (u16, u16)) -> Result<(), TerminalError> {
    let (need_cols, need_rows) = required_size(arena);
    let (cols, rows) = size;
    if cols < need_cols || rows < need_rows {
        return Err(TerminalError::TooSmall {
            cols,
            rows,
            need_cols,
            need_rows,
        });
    }
    Ok(())
}

/// Check the current terminal can show `arena`
pub fn ensure_fits(arena: Arena) -> Result<(), TerminalError> {
    check_fits(arena, terminal::size()?)
}

/// Raw mode plus alternate screen for as long as it lives
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
