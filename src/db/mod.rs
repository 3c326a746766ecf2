//! Data source abstraction for mongo-nav.
//!
//! The navigation core only reads four things from a server: database names,
//! collection names, a bounded page of documents, and one document by id.
//! `DataSource` captures exactly that so the core can run against the real
//! driver or an in-memory mock.

mod mock;
mod mongo;

pub use mock::{FailingDataSource, MockDataSource};
pub use mongo::MongoDataSource;

pub use mongodb::bson::oid::ObjectId;
pub use mongodb::bson::Document;

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Connects to the server described by `config` and returns a shared handle.
pub async fn connect(config: &ConnectionConfig) -> Result<Arc<dyn DataSource>> {
    let source = MongoDataSource::connect(config).await?;
    Ok(Arc::new(source))
}

/// Read-only access to a document server.
///
/// Implementations do not apply timeouts; callers bound every call.
/// Names are returned in the order the server reports them.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Lists the names of all databases.
    async fn list_database_names(&self) -> Result<Vec<String>>;

    /// Lists the names of all collections in `database`.
    async fn list_collection_names(&self, database: &str) -> Result<Vec<String>>;

    /// Fetches documents from a collection in server-default order.
    ///
    /// `limit` is passed to the server as a cap; `None` fetches everything.
    /// Any cursor opened for the query is released before this returns.
    async fn find_documents(
        &self,
        database: &str,
        collection: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Document>>;

    /// Fetches one document by its `_id`, or `None` if it does not exist.
    async fn find_document_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>>;

    /// Closes the underlying connection.
    async fn close(&self) -> Result<()>;
}
