//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking keystroke capture
//! - Unicode character support
//! - Different key meanings while the typing box is active

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// What the learner asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    Type(char),
    Backspace,
    HighlightPrev,
    HighlightNext,
    /// Select the highlighted phase (discards a running session)
    SelectHighlighted,
    /// Start, restart, or retry
    Start,
    ChooseDifferentPhase,
    ReloadCatalog,
}

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations (milliseconds)
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Poll for keystroke, waiting at most until `limit` or the poll timeout.
    /// Returns Some(KeyEvent) if key pressed, None if timeout
    pub fn read_key(&self, limit: Option<Duration>) -> IoResult<Option<KeyEvent>> {
        let timeout = limit.map_or(self.poll_timeout, |l| l.min(self.poll_timeout));
        if event::poll(timeout)? {
            match event::read()? {
                event::Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    Ok(Some(key_event))
                }
                _ => Ok(None),
            }
        } else {
            Ok(None)
        }
    }

    /// Map a key to a command. `typing` is true while the input box is shown.
    pub fn to_command(key: &KeyEvent, typing: bool) -> Option<UiCommand> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => Some(UiCommand::Quit),
            KeyCode::Esc => Some(UiCommand::Quit),
            KeyCode::Up => Some(UiCommand::HighlightPrev),
            KeyCode::Down => Some(UiCommand::HighlightNext),
            KeyCode::Enter => Some(UiCommand::SelectHighlighted),
            KeyCode::Backspace if typing => Some(UiCommand::Backspace),
            KeyCode::Char(c) if typing && !ctrl && !alt => Some(UiCommand::Type(c)),
            KeyCode::Char('s') | KeyCode::Char('r') | KeyCode::Char(' ') if !typing => {
                Some(UiCommand::Start)
            }
            KeyCode::Char('c') if !typing => Some(UiCommand::ChooseDifferentPhase),
            KeyCode::Char('l') if !typing => Some(UiCommand::ReloadCatalog),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
