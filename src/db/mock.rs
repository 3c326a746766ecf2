//! Mock data sources for testing.
//!
//! `MockDataSource` is an in-memory server that preserves insertion order,
//! counts backend calls and can simulate latency. `FailingDataSource` fails
//! every call, like a server that went away after startup.

use super::{DataSource, Document, ObjectId};
use crate::error::{MongoNavError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
struct MockCollection {
    name: String,
    documents: Vec<Document>,
}

#[derive(Debug, Clone)]
struct MockDatabase {
    name: String,
    collections: Vec<MockCollection>,
}

/// An in-memory data source with server-like ordering.
#[derive(Debug, Default)]
pub struct MockDataSource {
    databases: Vec<MockDatabase>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl MockDataSource {
    /// Creates an empty mock server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a database (no-op if it already exists).
    pub fn with_database(mut self, name: &str) -> Self {
        self.database_mut(name);
        self
    }

    /// Adds an empty collection, creating the database if needed.
    pub fn with_collection(mut self, database: &str, collection: &str) -> Self {
        self.collection_mut(database, collection);
        self
    }

    /// Appends documents to a collection, creating it if needed.
    pub fn with_documents(
        mut self,
        database: &str,
        collection: &str,
        documents: impl IntoIterator<Item = Document>,
    ) -> Self {
        self.collection_mut(database, collection)
            .documents
            .extend(documents);
        self
    }

    /// Delays every call by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns how many data source calls have been made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn database_mut(&mut self, name: &str) -> &mut MockDatabase {
        let index = match self.databases.iter().position(|db| db.name == name) {
            Some(index) => index,
            None => {
                self.databases.push(MockDatabase {
                    name: name.to_string(),
                    collections: Vec::new(),
                });
                self.databases.len() - 1
            }
        };
        &mut self.databases[index]
    }

    fn collection_mut(&mut self, database: &str, collection: &str) -> &mut MockCollection {
        let db = self.database_mut(database);
        let index = match db.collections.iter().position(|c| c.name == collection) {
            Some(index) => index,
            None => {
                db.collections.push(MockCollection {
                    name: collection.to_string(),
                    documents: Vec::new(),
                });
                db.collections.len() - 1
            }
        };
        &mut db.collections[index]
    }

    fn collection(&self, database: &str, collection: &str) -> Option<&MockCollection> {
        self.databases
            .iter()
            .find(|db| db.name == database)?
            .collections
            .iter()
            .find(|c| c.name == collection)
    }

    async fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn list_database_names(&self) -> Result<Vec<String>> {
        self.record_call().await;
        Ok(self.databases.iter().map(|db| db.name.clone()).collect())
    }

    async fn list_collection_names(&self, database: &str) -> Result<Vec<String>> {
        self.record_call().await;
        // Like the server, an unknown database simply has no collections
        Ok(self
            .databases
            .iter()
            .find(|db| db.name == database)
            .map(|db| db.collections.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default())
    }

    async fn find_documents(
        &self,
        database: &str,
        collection: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        self.record_call().await;
        let documents = self
            .collection(database, collection)
            .map(|c| c.documents.as_slice())
            .unwrap_or_default();
        let limit = limit.unwrap_or(documents.len());
        Ok(documents.iter().take(limit).cloned().collect())
    }

    async fn find_document_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>> {
        self.record_call().await;
        Ok(self.collection(database, collection).and_then(|c| {
            c.documents
                .iter()
                .find(|doc| doc.get_object_id("_id").ok() == Some(*id))
                .cloned()
        }))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A data source whose every call fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingDataSource {
    message: String,
}

impl FailingDataSource {
    /// Creates a failing data source.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(MongoNavError::query(self.message.clone()))
    }
}

#[async_trait]
impl DataSource for FailingDataSource {
    async fn list_database_names(&self) -> Result<Vec<String>> {
        self.fail()
    }

    async fn list_collection_names(&self, _database: &str) -> Result<Vec<String>> {
        self.fail()
    }

    async fn find_documents(
        &self,
        _database: &str,
        _collection: &str,
        _limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        self.fail()
    }

    async fn find_document_by_id(
        &self,
        _database: &str,
        _collection: &str,
        _id: &ObjectId,
    ) -> Result<Option<Document>> {
        self.fail()
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
