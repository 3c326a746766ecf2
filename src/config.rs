//! Configuration management for mongo-nav.
//!
//! Handles loading configuration from a TOML file and environment variables.
//! The connection string is resolved with this precedence:
//! 1. Positional CLI argument (highest)
//! 2. `MONGODB_URI` environment variable
//! 3. `connection.uri` from the config file
//! 4. `mongodb://localhost:27017`

use crate::error::{MongoNavError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_CONNECTION_STRING: &str = "mongodb://localhost:27017";

/// Environment variable consulted for the connection string.
pub const URI_ENV_VAR: &str = "MONGODB_URI";

const SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Server connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// MongoDB connection string.
    pub uri: Option<String>,

    /// Upper bound on connecting and the initial ping, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ConnectionConfig {
    /// Creates a connection config from a connection string.
    ///
    /// Only the scheme is checked here; the driver parses the rest.
    pub fn from_connection_string(conn_str: &str) -> Result<Self> {
        let conn_str = conn_str.trim();
        if !SCHEMES.iter().any(|scheme| conn_str.starts_with(scheme)) {
            return Err(MongoNavError::config(format!(
                "Invalid connection string '{}'. Expected 'mongodb://' or 'mongodb+srv://'",
                redact(conn_str)
            )));
        }

        Ok(Self {
            uri: Some(conn_str.to_string()),
            ..Default::default()
        })
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &ConnectionConfig) {
        if other.uri.is_some() {
            self.uri = other.uri.clone();
        }
        if other.connect_timeout_secs != default_connect_timeout_secs() {
            self.connect_timeout_secs = other.connect_timeout_secs;
        }
    }

    /// Applies `MONGODB_URI` from the process environment.
    pub fn apply_env_defaults(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies environment overrides using the given lookup.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(uri) = lookup(URI_ENV_VAR).filter(|uri| !uri.trim().is_empty()) {
            self.uri = Some(uri);
        }
    }

    /// Returns the connection string, falling back to the local default.
    pub fn uri(&self) -> &str {
        self.uri.as_deref().unwrap_or(DEFAULT_CONNECTION_STRING)
    }

    /// Returns the connect timeout as a duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns a display-safe string (no credentials, no options) for the UI.
    pub fn display_string(&self) -> String {
        let uri = self.uri();
        let rest = SCHEMES
            .iter()
            .find_map(|scheme| uri.strip_prefix(scheme))
            .unwrap_or(uri);
        let authority = rest.split(['/', '?']).next().unwrap_or(rest);
        let hosts = authority.rsplit('@').next().unwrap_or(authority);
        hosts.to_string()
    }
}

/// Replaces any userinfo in a connection string with `***`.
fn redact(conn_str: &str) -> String {
    match (conn_str.find("://"), conn_str.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &conn_str[..scheme_end + 3], &conn_str[at..])
        }
        _ => conn_str.to_string(),
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mongo-nav")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| MongoNavError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            MongoNavError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;

        if let Some(uri) = &config.connection.uri {
            ConnectionConfig::from_connection_string(uri)?;
        }

        Ok(config)
    }
}
