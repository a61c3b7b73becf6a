//! Crossterm terminal backend.
//!
//! The `Driver` wraps a buffered stdout writer and implements [`RenderSink`]:
//! each frame is diffed against the previously presented one and only changed
//! cells are written. Unset colors fall back to the terminal defaults.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::trace;

use super::cell::{Cell, Color};
use super::sink::{CellUpdate, RenderSink};
use super::visual::Visual;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// The driver does NOT enter the alternate screen on creation; call
/// [`Driver::enter`] explicitly and [`Driver::leave`] before exiting.
pub struct Driver {
    writer: BufWriter<Stdout>,
    previous: Option<Visual>,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> Self {
        Self { writer: BufWriter::new(io::stdout()), previous: None }
    }

    /// Enter the alternate screen, raw mode and mouse capture.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, event::EnableMouseCapture, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.previous = None;
        Ok(())
    }

    /// Restore the terminal.
    pub fn leave(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.writer, cursor::Show, event::DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Terminal size as (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_cell(&update.cell)?;
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }

    fn apply_cell(&mut self, cell: &Cell) -> io::Result<()> {
        queue!(
            self.writer,
            SetForegroundColor(to_crossterm(cell.fore)),
            SetBackgroundColor(to_crossterm(cell.back)),
            Print(cell.glyph().unwrap_or(' '))
        )
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for Driver {
    fn set_visual(&mut self, visual: &Visual) -> Result<()> {
        let updates = visual.diff(self.previous.as_ref());
        trace!(cells = updates.len(), "presenting frame");
        self.apply_updates(&updates)?;
        self.previous = Some(visual.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Color conversion
// ---------------------------------------------------------------------------

/// Map a toolkit color onto crossterm. Unset maps to the terminal default.
pub fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::None | Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::DarkRed => style::Color::DarkRed,
        Color::Green => style::Color::Green,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::Yellow => style::Color::Yellow,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::Blue => style::Color::Blue,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::Magenta => style::Color::Magenta,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::Cyan,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Indexed(i) => style::Color::AnsiValue(i),
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

// ===========================================================================
// Tests
// ===========================================================================
