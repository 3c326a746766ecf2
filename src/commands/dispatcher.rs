//! Routes input lines to the resolver and the lister.
//!
//! Commands that need the server are returned as a `PendingCommand`: a unit of
//! deferred work the event loop runs to completion before it accepts the next
//! line. Everything else is applied to the session immediately.

use super::router::{Command, CommandRouter};
use crate::db::DataSource;
use crate::error::CommandError;
use crate::navigation::{ListLimit, Lister, NavigationPath, PathResolver};
use crate::session::Session;
use std::sync::Arc;
use tracing::{debug, warn};

/// Message delivered back to the event loop when a command finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// `cd` succeeded; this is the new path.
    Navigated(NavigationPath),
    /// `ls` succeeded; this is the rendered listing.
    Listed(String),
    /// The command failed; the path stays as it was.
    Failed(CommandError),
}

#[derive(Clone)]
enum Work {
    Cd {
        resolver: PathResolver,
        target: String,
    },
    Ls {
        lister: Lister,
        limit: ListLimit,
    },
}

/// A `cd` or `ls` waiting to run against the server.
///
/// Owns everything it needs, so it can be moved onto a spawned task.
#[derive(Clone)]
pub struct PendingCommand {
    work: Work,
    path: NavigationPath,
}

impl PendingCommand {
    /// Short description for logs and the busy indicator.
    pub fn describe(&self) -> String {
        match &self.work {
            Work::Cd { target, .. } => format!("cd {target}"),
            Work::Ls {
                limit: ListLimit::Unbounded,
                ..
            } => "ls -la".to_string(),
            Work::Ls { .. } => "ls".to_string(),
        }
    }

    /// Runs the command. Failures come back as `CommandOutcome::Failed`.
    pub async fn run(self) -> CommandOutcome {
        let outcome = match self.work {
            Work::Cd { resolver, target } => resolver
                .resolve(&self.path, &target)
                .await
                .map(CommandOutcome::Navigated),
            Work::Ls { lister, limit } => lister
                .list(&self.path, limit)
                .await
                .map(|listing| CommandOutcome::Listed(listing.render())),
        };

        outcome.unwrap_or_else(|e| {
            debug!("Command failed: {}", e);
            CommandOutcome::Failed(e.into())
        })
    }
}

/// Parses input lines and delegates them.
#[derive(Clone)]
pub struct CommandDispatcher {
    resolver: PathResolver,
    lister: Lister,
}

impl CommandDispatcher {
    /// Creates a dispatcher with default timeouts over `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            resolver: PathResolver::new(Arc::clone(&source)),
            lister: Lister::new(source),
        }
    }

    /// Creates a dispatcher from preconfigured components.
    pub fn with_components(resolver: PathResolver, lister: Lister) -> Self {
        Self { resolver, lister }
    }

    /// Handles one input line.
    ///
    /// Blank input, `cd` with no target and unknown verbs are settled here and
    /// return `None`. `cd <target>` and `ls` return the work to run; the caller
    /// applies its outcome with `Session::apply`. A failed session refuses
    /// everything.
    pub fn dispatch(&self, session: &mut Session, input: &str) -> Option<PendingCommand> {
        if session.is_failed() {
            warn!("Ignoring input, session has no connection");
            return None;
        }

        let command = CommandRouter::parse(input)?;
        debug!("Dispatching {:?} at {}", command, session.path());

        let work = match command {
            Command::Cd(None) => {
                session.reset();
                return None;
            }
            Command::Cd(Some(target)) => Work::Cd {
                resolver: self.resolver.clone(),
                target,
            },
            Command::Ls { show_all } => Work::Ls {
                lister: self.lister.clone(),
                limit: ListLimit::from_show_all(show_all),
            },
            Command::Unknown(verb) => {
                session.fail(CommandError::UnknownCommand(verb));
                return None;
            }
        };

        Some(PendingCommand {
            work,
            path: session.path().clone(),
        })
    }

    /// Dispatches and, if needed, runs the command inline.
    pub async fn execute(&self, session: &mut Session, input: &str) {
        if let Some(pending) = self.dispatch(session, input) {
            let outcome = pending.run().await;
            session.apply(outcome);
        }
    }
}
