//! Interactive session state.
//!
//! One `Session` lives for the whole run: created at startup, mutated by one
//! command at a time, dropped at quit.

use crate::commands::CommandOutcome;
use crate::error::CommandError;
use crate::navigation::NavigationPath;
use std::fmt;

/// Navigation path plus the result of the last command.
#[derive(Debug, Default)]
pub struct Session {
    path: NavigationPath,
    output: String,
    error: Option<CommandError>,
    /// Set when the connection could not be established; never cleared.
    fatal: Option<String>,
}

impl Session {
    /// Creates a session at the root path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that failed to connect and accepts no commands.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            fatal: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Returns true if the session is in the permanent connection-failure state.
    pub fn is_failed(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> Option<&CommandError> {
        self.error.as_ref()
    }

    /// `cd` with no target: back to root with a clean slate.
    pub fn reset(&mut self) {
        self.path = NavigationPath::root();
        self.output.clear();
        self.error = None;
    }

    /// Records an error without touching the path or the output.
    pub fn fail(&mut self, error: CommandError) {
        self.error = Some(error);
    }

    /// Applies the outcome of a completed command.
    pub fn apply(&mut self, outcome: CommandOutcome) {
        if self.is_failed() {
            return;
        }
        match outcome {
            CommandOutcome::Navigated(path) => {
                self.path = path;
                self.output.clear();
                self.error = None;
            }
            CommandOutcome::Listed(output) => {
                self.output = output;
                self.error = None;
            }
            CommandOutcome::Failed(error) => {
                self.output.clear();
                self.error = Some(error);
            }
        }
    }

    /// Text for the output panel: the error if there is one, else the output.
    pub fn display_text(&self) -> String {
        if let Some(fatal) = &self.fatal {
            format!("Error: {fatal}\n")
        } else if let Some(error) = &self.error {
            format!("Error: {error}\n")
        } else {
            self.output.clone()
        }
    }
}
