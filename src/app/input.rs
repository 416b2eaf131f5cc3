//! Command Line - Key Handling for the Dashboard Input Field
//!
//! Keys typed into the dashboard accumulate here until Enter submits the
//! line to [`ConsoleAction::parse`](crate::app::actions::ConsoleAction::parse).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Nothing to do beyond a redraw
    None,
    /// Enter pressed; carries the typed line
    Submit(String),
    /// Ctrl-C
    Quit,
}

/// Editable single-line input
#[derive(Debug, Default)]
pub struct CommandLine {
    buffer: String,
}

impl CommandLine {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor column, in characters from the start of the line
    pub fn cursor(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        // Windows also reports releases
        if key.kind == KeyEventKind::Release {
            return InputEvent::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputEvent::Quit;
        }

        match key.code {
            KeyCode::Enter => InputEvent::Submit(std::mem::take(&mut self.buffer)),
            KeyCode::Char(c) => {
                self.buffer.push(c);
                InputEvent::None
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                InputEvent::None
            }
            KeyCode::Esc => {
                self.buffer.clear();
                InputEvent::None
            }
            _ => InputEvent::None,
        }
    }
}
