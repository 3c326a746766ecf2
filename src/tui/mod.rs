//! Terminal User Interface for mongo-nav.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod ui;
pub mod widgets;

pub use app::{App, InputState};

use crate::commands::{CommandOutcome, PendingCommand};
use crate::error::{MongoNavError, Result};
use crossterm::{
    event::{Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// A terminal event from the reader task.
    Terminal(CEvent),
    /// The reader task could not read the terminal and stopped.
    InputFailed(String),
    /// A `cd` or `ls` finished.
    CommandFinished(CommandOutcome),
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self { terminal })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| MongoNavError::terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            MongoNavError::terminal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| MongoNavError::terminal(format!("Failed to create terminal: {e}")))
    }

    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| MongoNavError::terminal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            MongoNavError::terminal(format!("Failed to leave alternate screen: {e}"))
        })?;

        self.terminal
            .show_cursor()
            .map_err(|e| MongoNavError::terminal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the event loop until the user quits.
    pub async fn run(&mut self, app_state: &mut App) -> Result<()> {
        // Restore the terminal before the default hook prints the panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(8);
        let result = self.run_event_loop(app_state, tx, &mut rx).await;

        let _ = panic::take_hook();
        result
    }

    async fn run_event_loop(
        &mut self,
        app_state: &mut App,
        tx: mpsc::Sender<AsyncMessage>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        Self::spawn_event_reader(tx.clone());

        loop {
            self.terminal
                .draw(|frame| ui::render(frame, app_state))
                .map_err(|e| MongoNavError::terminal(format!("Failed to draw: {e}")))?;

            if !app_state.running {
                break;
            }

            match rx.recv().await {
                Some(msg) => Self::handle_async_message(msg, app_state, &tx)?,
                None => break,
            }
        }

        Ok(())
    }

    /// Reads terminal events on a blocking thread and forwards every one of
    /// them to the loop. Stops once the loop drops its receiver.
    fn spawn_event_reader(tx: mpsc::Sender<AsyncMessage>) {
        tokio::task::spawn_blocking(move || {
            while !tx.is_closed() {
                let event = match crossterm::event::poll(TICK_RATE) {
                    Ok(false) => continue,
                    Ok(true) => crossterm::event::read(),
                    Err(e) => Err(e),
                };
                let msg = match event {
                    Ok(event) => AsyncMessage::Terminal(event),
                    Err(e) => {
                        warn!("Terminal input failed: {}", e);
                        let _ = tx.blocking_send(AsyncMessage::InputFailed(e.to_string()));
                        break;
                    }
                };
                if tx.blocking_send(msg).is_err() {
                    break;
                }
            }
            debug!("Event reader stopped");
        });
    }

    fn handle_crossterm_event(event: CEvent, app_state: &mut App) -> Option<PendingCommand> {
        match event {
            // Windows reports key releases too
            CEvent::Key(key) if key.kind == KeyEventKind::Press => app_state.handle_key(key),
            _ => None,
        }
    }

    fn spawn_command(pending: PendingCommand, tx: mpsc::Sender<AsyncMessage>) {
        debug!("Running '{}'", pending.describe());
        tokio::spawn(async move {
            let outcome = pending.run().await;
            if tx.send(AsyncMessage::CommandFinished(outcome)).await.is_err() {
                debug!("Event loop gone, dropping command outcome");
            }
        });
    }

    fn handle_async_message(
        msg: AsyncMessage,
        app_state: &mut App,
        tx: &mpsc::Sender<AsyncMessage>,
    ) -> Result<()> {
        match msg {
            AsyncMessage::Terminal(event) => {
                if let Some(pending) = Self::handle_crossterm_event(event, app_state) {
                    Self::spawn_command(pending, tx.clone());
                }
            }
            AsyncMessage::InputFailed(reason) => {
                return Err(MongoNavError::terminal(format!(
                    "Failed to read terminal input: {reason}"
                )));
            }
            AsyncMessage::CommandFinished(outcome) => app_state.finish_command(outcome),
        }
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI over `app_state` until the user quits.
pub async fn run(app_state: &mut App) -> Result<()> {
    let mut tui = Tui::new()?;
    info!("Starting TUI");
    let result = tui.run(app_state).await;
    drop(tui);
    info!("TUI exited");
    result
}
