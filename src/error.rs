//! Error types for mongo-nav.
//!
//! `MongoNavError` covers process-level failures (startup, terminal, config).
//! `NavigationError` and `CommandError` are the recoverable outcomes of a
//! single shell command; they are stored in the session and rendered, never
//! propagated out of the event loop.

use thiserror::Error;

/// Main error type for application-level operations.
#[derive(Error, Debug)]
pub enum MongoNavError {
    /// Server connection errors (bad URI, host unreachable, ping failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Read failures reported by the server or driver (auth, bad names, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup/teardown and drawing errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MongoNavError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a terminal error with the given message.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Terminal(_) => "Terminal Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using MongoNavError.
pub type Result<T> = std::result::Result<T, MongoNavError>;

/// Failure of a `cd` or `ls` against the navigation hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("database '{0}' does not exist")]
    DatabaseNotFound(String),

    #[error("collection '{collection}' does not exist in database '{database}'")]
    CollectionNotFound { collection: String, database: String },

    /// The third path segment is not a well-formed ObjectId.
    #[error("invalid document ID: {0}")]
    InvalidDocumentId(String),

    #[error("document with ID '{0}' not found")]
    DocumentNotFound(String),

    #[error("invalid path depth")]
    InvalidPathDepth,

    /// A path segment could not be compiled as a name pattern.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Server, driver or timeout failure, with the call that produced it.
    #[error("{context}: {message}")]
    Backend { context: String, message: String },
}

impl NavigationError {
    /// Creates a backend error for the named call.
    pub fn backend(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors that came from the server rather than from
    /// validating the path.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }
}

/// Failure of a whole shell command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
