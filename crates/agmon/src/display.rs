//! In-place frame drawing.
//!
//! Each refresh overwrites the previous frame without scrolling:
//!
//! - the very first frame is preceded by a full-screen clear
//! - every frame starts with an absolute cursor-home (`MoveTo(0,0)`,
//!   never "up N lines" — the relative form drifts when the terminal
//!   resizes between frames)
//! - every line ends with a clear-to-end-of-line, erasing leftovers
//!   from a wider previous frame
//! - the frame ends with a clear-to-end-of-screen, erasing leftover
//!   lines from a taller previous frame
//!
//! The writer is flushed exactly once per frame, so a frame is as
//! atomic as the terminal allows.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

/// Width assumed when the output is not a terminal.
const FALLBACK_WIDTH: usize = 80;

/// Draws rendered lines over the previous frame.
///
/// Generic over the writer so tests can draw into a byte buffer and
/// assert on the exact escape sequence contract.
#[derive(Debug)]
pub struct DisplayDriver<W: Write> {
    out: W,
    first_frame: bool,
}

impl<W: Write> DisplayDriver<W> {
    /// Creates a driver over a writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            first_frame: true,
        }
    }

    /// Current terminal width in columns, or the fallback when the
    /// process has no terminal. Re-measured every frame so a resize
    /// between frames is picked up by the next draw.
    pub fn width(&self) -> usize {
        terminal::size()
            .map(|(cols, _rows)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH)
    }

    /// Writes one frame and flushes.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.first_frame {
            queue!(self.out, Clear(ClearType::All))?;
            self.first_frame = false;
        }

        queue!(self.out, MoveTo(0, 0))?;

        for line in lines {
            queue!(
                self.out,
                Print(line),
                Clear(ClearType::UntilNewLine),
                Print("\r\n")
            )?;
        }

        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        self.out.flush()
    }
}
