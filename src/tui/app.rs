//! Application state for the TUI.
//!
//! Contains the main App struct and the line-editing state of the input bar.

use crate::commands::{CommandDispatcher, CommandOutcome, PendingCommand};
use crate::session::Session;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Input state for text editing.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.text.insert(index, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index(self.cursor);
            self.text.remove(index);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let index = self.byte_index(self.cursor);
            self.text.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Input field state.
    pub input: InputState,
    /// Navigation state and last result.
    pub session: Session,
    /// Server connection info for display.
    pub connection_info: String,
    /// Description of the command currently running against the server.
    pub in_flight: Option<String>,
    dispatcher: Option<CommandDispatcher>,
}

impl App {
    /// Creates an app for a connected session.
    pub fn new(dispatcher: CommandDispatcher, connection_info: impl Into<String>) -> Self {
        Self::with_session(Some(dispatcher), Session::new(), connection_info)
    }

    /// Creates an app whose connection failed; it only displays the error.
    pub fn disconnected(reason: impl std::fmt::Display, connection_info: impl Into<String>) -> Self {
        Self::with_session(None, Session::failed(reason), connection_info)
    }

    fn with_session(
        dispatcher: Option<CommandDispatcher>,
        session: Session,
        connection_info: impl Into<String>,
    ) -> Self {
        Self {
            running: true,
            input: InputState::new(),
            session,
            connection_info: connection_info.into(),
            in_flight: None,
            dispatcher,
        }
    }

    /// Returns true while a command is waiting on the server.
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns true if the session is connected to a server.
    pub fn is_connected(&self) -> bool {
        !self.session.is_failed()
    }

    /// Handles a key press.
    ///
    /// Returns work to run when Enter submits a `cd`/`ls` that needs the
    /// server. Submissions are refused while another command is in flight.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PendingCommand> {
        match key.code {
            KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Enter => return self.submit_input(),
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
        None
    }

    /// Submits the current input to the dispatcher.
    pub fn submit_input(&mut self) -> Option<PendingCommand> {
        if self.is_processing() {
            debug!("Command in flight, input not submitted");
            return None;
        }

        let line = self.input.take();
        let dispatcher = self.dispatcher.as_ref()?;
        let pending = dispatcher.dispatch(&mut self.session, line.trim())?;
        self.in_flight = Some(pending.describe());
        Some(pending)
    }

    /// Applies the outcome of the in-flight command.
    pub fn finish_command(&mut self, outcome: CommandOutcome) {
        self.in_flight = None;
        self.session.apply(outcome);
    }
}
