//! `ls`: depth-driven listings with truncation.

use super::{bounded, NavigationPath};
use crate::db::{DataSource, Document, ObjectId};
use crate::error::NavigationError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Entries shown by a plain `ls`.
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Bound on each data source call made while listing.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Trailing line appended when a listing was capped.
pub const TRUNCATION_MARKER: &str = "... (results truncated)\n";

/// How many entries a listing may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLimit {
    Bounded(usize),
    Unbounded,
}

impl ListLimit {
    /// `ls -la` shows everything, plain `ls` uses the default bound.
    pub fn from_show_all(show_all: bool) -> Self {
        if show_all {
            Self::Unbounded
        } else {
            Self::default()
        }
    }

    fn as_option(self) -> Option<usize> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self::Bounded(DEFAULT_LIST_LIMIT)
    }
}

/// What a listing contains.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingEntries {
    /// Database or collection names.
    Names(Vec<String>),
    /// Documents, each rendered on one line.
    Documents(Vec<Document>),
}

/// The result of one `ls`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingResult {
    pub entries: ListingEntries,
    pub truncated: bool,
}

impl ListingResult {
    /// Builds a name listing, keeping at most `limit` names.
    ///
    /// Truncated iff more names existed than were kept.
    pub fn names(mut names: Vec<String>, limit: ListLimit) -> Self {
        let truncated = match limit.as_option() {
            Some(max) if names.len() > max => {
                names.truncate(max);
                true
            }
            _ => false,
        };
        Self {
            entries: ListingEntries::Names(names),
            truncated,
        }
    }

    /// Builds a document listing from a server-capped query.
    ///
    /// The server already applied the cap, so the total is unknown. Reaching
    /// the limit is reported as truncated, which is wrong when exactly `limit`
    /// documents exist.
    pub fn documents(documents: Vec<Document>, limit: ListLimit) -> Self {
        let truncated = matches!(limit.as_option(), Some(max) if documents.len() >= max);
        Self {
            entries: ListingEntries::Documents(documents),
            truncated,
        }
    }

    /// A single document, never truncated.
    pub fn single(document: Document) -> Self {
        Self {
            entries: ListingEntries::Documents(vec![document]),
            truncated: false,
        }
    }

    /// Number of entries shown.
    pub fn len(&self) -> usize {
        match &self.entries {
            ListingEntries::Names(names) => names.len(),
            ListingEntries::Documents(documents) => documents.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders one line per entry, plus the marker if truncated.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Renders a document in bson's display form on one line.
///
/// String values are written unescaped by bson, so control characters inside
/// them are escaped here (`\n` becomes the two characters `\` `n`).
fn single_line(document: &Document) -> String {
    let rendered = document.to_string();
    if !rendered.contains(char::is_control) {
        return rendered;
    }
    rendered
        .chars()
        .fold(String::with_capacity(rendered.len()), |mut out, c| {
            if c.is_control() {
                out.extend(c.escape_default());
            } else {
                out.push(c);
            }
            out
        })
}

impl fmt::Display for ListingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entries {
            ListingEntries::Names(names) => {
                for name in names {
                    writeln!(f, "{name}")?;
                }
            }
            ListingEntries::Documents(documents) => {
                for document in documents {
                    writeln!(f, "{}", single_line(document))?;
                }
            }
        }
        if self.truncated {
            f.write_str(TRUNCATION_MARKER)?;
        }
        Ok(())
    }
}

/// Lists whatever the current path points at.
#[derive(Clone)]
pub struct Lister {
    source: Arc<dyn DataSource>,
    timeout: Duration,
}

impl Lister {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            timeout: LIST_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lists by depth:
    ///
    /// | depth | lists |
    /// |---|---|
    /// | 0 | database names |
    /// | 1 | collection names of the database |
    /// | 2 | documents of the collection |
    /// | 3 | the one document with that `_id` |
    ///
    /// Any other depth is `InvalidPathDepth`.
    pub async fn list(
        &self,
        path: &NavigationPath,
        limit: ListLimit,
    ) -> Result<ListingResult, NavigationError> {
        debug!("ls {} ({:?})", path, limit);
        match path.segments() {
            [] => self.list_databases(limit).await,
            [database] => self.list_collections(database, limit).await,
            [database, collection] => self.list_documents(database, collection, limit).await,
            [database, collection, id] => self.show_document(database, collection, id).await,
            _ => Err(NavigationError::InvalidPathDepth),
        }
    }

    async fn list_databases(&self, limit: ListLimit) -> Result<ListingResult, NavigationError> {
        let names = bounded(
            self.timeout,
            "list databases",
            self.source.list_database_names(),
        )
        .await?;
        Ok(ListingResult::names(names, limit))
    }

    async fn list_collections(
        &self,
        database: &str,
        limit: ListLimit,
    ) -> Result<ListingResult, NavigationError> {
        let context = format!("list collections in '{database}'");
        let names = bounded(
            self.timeout,
            &context,
            self.source.list_collection_names(database),
        )
        .await?;
        Ok(ListingResult::names(names, limit))
    }

    async fn list_documents(
        &self,
        database: &str,
        collection: &str,
        limit: ListLimit,
    ) -> Result<ListingResult, NavigationError> {
        let context = format!("find documents in '{database}.{collection}'");
        let documents = bounded(
            self.timeout,
            &context,
            self.source
                .find_documents(database, collection, limit.as_option()),
        )
        .await?;
        Ok(ListingResult::documents(documents, limit))
    }

    async fn show_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> Result<ListingResult, NavigationError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| NavigationError::InvalidDocumentId(id.to_string()))?;

        let context = format!("find document in '{database}.{collection}'");
        bounded(
            self.timeout,
            &context,
            self.source
                .find_document_by_id(database, collection, &object_id),
        )
        .await?
        .map(ListingResult::single)
        .ok_or_else(|| NavigationError::DocumentNotFound(id.to_string()))
    }
}
