//! Command parsing and dispatch for the shell.
//!
//! Parsing is kept separate from execution so the command vocabulary can be
//! tested without a server.

pub mod dispatcher;
pub mod router;

pub use dispatcher::{CommandDispatcher, CommandOutcome, PendingCommand};
pub use router::{Command, CommandRequest, CommandRouter};
