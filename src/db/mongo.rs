//! MongoDB data source implementation.
//!
//! Provides the `MongoDataSource` struct that implements the `DataSource`
//! trait using the official `mongodb` driver.

use crate::config::ConnectionConfig;
use crate::db::{DataSource, Document, ObjectId};
use crate::error::{MongoNavError, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::{debug, info};

/// Application name reported to the server.
const APP_NAME: &str = "mongo-nav";

/// MongoDB data source backed by a long-lived driver client.
#[derive(Debug, Clone)]
pub struct MongoDataSource {
    client: Client,
}

impl MongoDataSource {
    /// Creates a data source from an existing client.
    ///
    /// No ping is performed; this is mainly useful for tests.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Connects to the server and verifies it answers a ping.
    ///
    /// Both option resolution (which may involve SRV lookups) and the ping are
    /// bounded by the configured connect timeout.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let timeout = config.connect_timeout();
        let uri = config.uri();

        debug!("Resolving client options for {}", config.display_string());
        let mut options = tokio::time::timeout(timeout, async { ClientOptions::parse(uri).await })
            .await
            .map_err(|_| {
                MongoNavError::connection(format!(
                    "Timed out resolving connection string after {}s",
                    timeout.as_secs()
                ))
            })?
            .map_err(|e| MongoNavError::connection(format!("Invalid connection string: {e}")))?;

        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).map_err(|e| {
            MongoNavError::connection(format!("Failed to connect to MongoDB: {e}"))
        })?;

        tokio::time::timeout(timeout, async {
            client.database("admin").run_command(doc! { "ping": 1 }).await
        })
        .await
        .map_err(|_| {
            MongoNavError::connection(format!(
                "Timed out pinging MongoDB after {}s",
                timeout.as_secs()
            ))
        })?
        .map_err(|e| MongoNavError::connection(format!("Failed to ping MongoDB: {e}")))?;

        info!("Connected to {}", config.display_string());
        Ok(Self { client })
    }
}

#[async_trait]
impl DataSource for MongoDataSource {
    async fn list_database_names(&self) -> Result<Vec<String>> {
        self.client
            .list_database_names()
            .await
            .map_err(|e| MongoNavError::query(e.to_string()))
    }

    async fn list_collection_names(&self, database: &str) -> Result<Vec<String>> {
        self.client
            .database(database)
            .list_collection_names()
            .await
            .map_err(|e| MongoNavError::query(e.to_string()))
    }

    async fn find_documents(
        &self,
        database: &str,
        collection: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);

        let mut find = coll.find(doc! {});
        if let Some(limit) = limit {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            find = find.limit(limit);
        }

        let cursor = find
            .await
            .map_err(|e| MongoNavError::query(e.to_string()))?;

        // The cursor is consumed here; dropping it on either path kills it
        // server-side.
        cursor
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| MongoNavError::query(e.to_string()))
    }

    async fn find_document_by_id(
        &self,
        database: &str,
        collection: &str,
        id: &ObjectId,
    ) -> Result<Option<Document>> {
        self.client
            .database(database)
            .collection::<Document>(collection)
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| MongoNavError::query(e.to_string()))
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().shutdown().immediate(true).await;
        Ok(())
    }
}
