#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed terminal adapter for Hydrogen Bombs.
//!
//! The terminal stays in cooked mode while frames are drawn. Raw mode is only
//! held for the duration of a key poll through [`RawModeGuard`], whose `Drop`
//! restores the previous mode on every exit path, including `?` returns and
//! panics.

mod input;

pub use input::{map_key, RawModeGuard, TerminalInput};

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use hydrogen_bombs_rendering::{Frame, Renderer};

/// Renderer that draws frames onto a terminal-like writer.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    cursor_hidden: bool,
}

impl TerminalRenderer<Stdout> {
    /// Creates a renderer drawing onto standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Wraps the provided writer.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            cursor_hidden: false,
        }
    }

    /// Restores the cursor and leaves the last frame on screen.
    pub fn finish(&mut self) -> Result<()> {
        if self.cursor_hidden {
            queue!(self.out, Show).context("failed to show the cursor")?;
            self.cursor_hidden = false;
        }
        self.out.flush().context("failed to flush the terminal")
    }

    /// Consumes the renderer and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> Result<()> {
        if !self.cursor_hidden {
            queue!(self.out, Hide).context("failed to hide the cursor")?;
            self.cursor_hidden = true;
        }
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
            .context("failed to clear the terminal")
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        for line in frame.lines() {
            // Explicit line moves keep the layout intact even if raw mode leaks.
            queue!(self.out, Print(line), MoveToNextLine(1))
                .context("failed to draw a frame line")?;
        }
        self.out.flush().context("failed to flush the terminal")
    }
}
