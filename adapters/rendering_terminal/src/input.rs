//! Non-blocking keyboard input.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use hydrogen_bombs_core::{InputSource, KeyAction};

/// Holds the terminal in raw mode until dropped.
///
/// Raw mode disables echo and line buffering so single key presses are
/// delivered without Enter. The previous mode is restored on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    restore: bool,
}

impl RawModeGuard {
    /// Switches the terminal into raw mode.
    pub fn acquire() -> Result<Self> {
        let already_raw = terminal::is_raw_mode_enabled().unwrap_or(false);
        if !already_raw {
            terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        }
        Ok(Self {
            restore: !already_raw,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.restore {
            return;
        }
        if let Err(error) = terminal::disable_raw_mode() {
            log::error!("failed to restore terminal mode: {error}");
        }
    }
}

/// Keyboard source reading from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    /// Creates a new terminal input source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Blocks until a key is pressed and returns its action.
    pub fn wait_for_key(&mut self) -> Result<KeyAction> {
        let _raw = RawModeGuard::acquire()?;
        loop {
            if let Some(action) = read_key_press()? {
                return Ok(action);
            }
        }
    }
}

impl InputSource for TerminalInput {
    type Error = anyhow::Error;

    fn poll_key(&mut self) -> Result<KeyAction> {
        // Raw mode covers the poll only. For the rest of the tick the terminal
        // is cooked and echoes keys typed mid-tick until the next poll reads them.
        let _raw = RawModeGuard::acquire()?;
        if !event::poll(Duration::ZERO).context("failed to poll the terminal")? {
            return Ok(KeyAction::None);
        }
        Ok(read_key_press()?.unwrap_or_default())
    }
}

fn read_key_press() -> Result<Option<KeyAction>> {
    match event::read().context("failed to read a terminal event")? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(map_key(key))),
        _ => Ok(None),
    }
}

/// Maps a terminal key event onto a game action.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(character) => KeyAction::from_char(character),
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
