//! Logging configuration for mongo-nav.
//!
//! The shell owns the terminal while it runs, so logs go to a file instead of
//! stderr. Startup failures that happen before the terminal is taken over are
//! reported on stderr by `main`.
//!
//! At `info` the file records the config path, the host list being connected
//! to and the TUI start and stop. `RUST_LOG=mongo_nav=debug` adds every
//! dispatched `cd`/`ls` with the path it ran at, the candidate path of each
//! `cd`, listing depth and limit, and command failures. Credentials never
//! reach the log: only `ConnectionConfig::display_string` is written.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initializes file logging for the interactive session.
///
/// Location: `~/.local/state/mongo-nav/mongo-nav.log` on Linux (XDG state
/// directory), or the platform-appropriate state/config directory elsewhere.
/// The filter defaults to `info` and honours `RUST_LOG`.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return;
        }
    }

    // Truncated on each run
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Returns the path for the log file.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("mongo-nav").join("mongo-nav.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("mongo-nav").join("mongo-nav.log");
    }

    std::env::temp_dir().join("mongo-nav.log")
}
