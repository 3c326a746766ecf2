//! Command-line argument parsing for mongo-nav.

use clap::Parser;
use mongo_nav::config::ConnectionConfig;
use mongo_nav::error::Result;

/// Browse a MongoDB deployment like a filesystem.
///
/// `cd <path>` moves between databases, collections and documents; `ls` lists
/// what is there (`ls -la` lifts the five-entry limit). Esc or Ctrl+C quits.
#[derive(Parser, Debug)]
#[command(name = "mongo-nav")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// MongoDB connection string (e.g., mongodb://localhost:27017)
    #[arg(value_name = "CONNECTION_STRING")]
    pub connection_string: Option<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds a connection config from the positional argument, if given.
    pub fn to_connection_config(&self) -> Result<Option<ConnectionConfig>> {
        self.connection_string
            .as_deref()
            .map(ConnectionConfig::from_connection_string)
            .transpose()
    }
}
