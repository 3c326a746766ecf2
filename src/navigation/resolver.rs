//! `cd` target resolution and validation against the live server.

use super::{bounded, NavigationPath};
use crate::db::DataSource;
use crate::error::NavigationError;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Bound on each data source call made while validating a path.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves `cd` targets into validated navigation paths.
#[derive(Clone)]
pub struct PathResolver {
    source: Arc<dyn DataSource>,
    timeout: Duration,
}

impl PathResolver {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            timeout: RESOLVE_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Applies `target` to `current` and validates the result.
    ///
    /// Database and collection segments are matched as anchored patterns
    /// (`^segment$`) against the names the server reports. Collections are
    /// looked up under the database segment as typed, the same name `ls` uses. The document segment is not checked here. On success
    /// the candidate is returned as typed, not rewritten to the matched names.
    pub async fn resolve(
        &self,
        current: &NavigationPath,
        target: &str,
    ) -> Result<NavigationPath, NavigationError> {
        let candidate = current.resolve(target);
        debug!("cd {} -> candidate {}", current, candidate);
        self.validate(&candidate).await?;
        Ok(candidate)
    }

    async fn validate(&self, candidate: &NavigationPath) -> Result<(), NavigationError> {
        let Some(db_segment) = candidate.database() else {
            return Ok(());
        };

        let db_pattern = anchored(db_segment)?;
        let databases = bounded(
            self.timeout,
            "list databases",
            self.source.list_database_names(),
        )
        .await?;
        if !matches_any(&db_pattern, &databases) {
            return Err(NavigationError::DatabaseNotFound(db_segment.to_string()));
        }

        let Some(coll_segment) = candidate.collection() else {
            return Ok(());
        };

        // Collections are read under the segment as typed, which is also what
        // `ls` will query
        let coll_pattern = anchored(coll_segment)?;
        let context = format!("list collections in '{db_segment}'");
        let collections = bounded(
            self.timeout,
            &context,
            self.source.list_collection_names(db_segment),
        )
        .await?;
        if !matches_any(&coll_pattern, &collections) {
            return Err(NavigationError::CollectionNotFound {
                collection: coll_segment.to_string(),
                database: db_segment.to_string(),
            });
        }

        Ok(())
    }
}

/// Compiles a path segment as `^segment$`.
fn anchored(segment: &str) -> Result<Regex, NavigationError> {
    Regex::new(&format!("^{segment}$")).map_err(|e| NavigationError::InvalidPattern {
        pattern: segment.to_string(),
        reason: e.to_string(),
    })
}

fn matches_any(pattern: &Regex, names: &[String]) -> bool {
    names.iter().any(|name| pattern.is_match(name))
}
