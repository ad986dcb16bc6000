//! Key handling for the spindle TUI.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One user intent, decoded from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// A digit typed into the slice entry.
    Digit(u8),
    /// Clear the last typed digit.
    Erase,
    /// Request a spin for the entered slice.
    Spin,
    /// Double the playback rate.
    Rapid,
    /// Jump straight to the resting state.
    Instant,
    Quit,
}

/// Poll for the next decoded action without blocking the frame loop.
///
/// Returns `Ok(None)` when no relevant key is pending within `timeout`.
/// Key releases and repeats are ignored so held keys do not re-trigger.
pub fn poll_action(timeout: Duration) -> Result<Option<UiAction>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let Event::Key(key) = event::read()? else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    Ok(decode(key))
}

fn decode(key: KeyEvent) -> Option<UiAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiAction::Quit);
    }
    match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(UiAction::Digit(c as u8 - b'0')),
        KeyCode::Backspace => Some(UiAction::Erase),
        KeyCode::Enter => Some(UiAction::Spin),
        KeyCode::Char('r') => Some(UiAction::Rapid),
        KeyCode::Char('i') => Some(UiAction::Instant),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
        _ => None,
    }
}
