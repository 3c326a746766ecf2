//! Command parsing and routing for the shell.
//!
//! Input is split on whitespace with no quoting or escaping; every token is a
//! literal argument. The first token is the verb.

/// One input line split into a verb and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub verb: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    /// Tokenizes an input line. Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let mut tokens = input.split_whitespace().map(str::to_string);
        let verb = tokens.next()?;
        Some(Self {
            verb,
            args: tokens.collect(),
        })
    }

    /// The first argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `cd` alone goes to root; `cd <target>` navigates.
    Cd(Option<String>),
    /// `ls`, or `ls -la` for an unbounded listing.
    Ls { show_all: bool },
    /// Anything else, carrying the verb.
    Unknown(String),
}

/// Routes parsed requests to commands.
pub struct CommandRouter;

impl CommandRouter {
    /// Parses user input into a Command. Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Command> {
        CommandRequest::parse(input).map(|request| Self::route(&request))
    }

    /// Maps a request onto a command. Extra arguments are ignored.
    pub fn route(request: &CommandRequest) -> Command {
        match request.verb.as_str() {
            "cd" => Command::Cd(request.first_arg().map(str::to_string)),
            "ls" => Command::Ls {
                show_all: request.first_arg() == Some("-la"),
            },
            other => Command::Unknown(other.to_string()),
        }
    }
}
