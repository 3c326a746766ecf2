//! Tests against a real MongoDB server.
//!
//! Set `MONGODB_TEST_URI` to run them. Each test seeds its own scratch
//! database and drops it afterwards.

use mongo_nav::commands::CommandDispatcher;
use mongo_nav::config::ConnectionConfig;
use mongo_nav::db::{DataSource, MongoDataSource};
use mongo_nav::session::Session;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Client;
use std::sync::Arc;

fn get_test_uri() -> Option<String> {
    std::env::var("MONGODB_TEST_URI").ok()
}

/// Connects and seeds `<name>` with an `items` collection of `count` documents.
async fn seeded_client(name: &str, count: i32) -> Option<(Client, Vec<ObjectId>)> {
    let uri = get_test_uri()?;
    let client = Client::with_uri_str(&uri).await.ok()?;
    let database = client.database(name);
    database.drop().await.ok()?;

    let ids: Vec<ObjectId> = (0..count).map(|_| ObjectId::new()).collect();
    let documents = ids
        .iter()
        .enumerate()
        .map(|(n, id)| doc! { "_id": *id, "n": n as i32 });
    database
        .collection::<Document>("items")
        .insert_many(documents)
        .await
        .ok()?;
    Some((client, ids))
}

async fn drop_database(client: &Client, name: &str) {
    let _ = client.database(name).drop().await;
}

#[tokio::test]
async fn test_connect_and_ping() {
    let Some(uri) = get_test_uri() else {
        eprintln!("Skipping test: MONGODB_TEST_URI not set");
        return;
    };

    let config = ConnectionConfig::from_connection_string(&uri).unwrap();
    let source = MongoDataSource::connect(&config).await.unwrap();
    let names = source.list_database_names().await.unwrap();
    assert!(names.iter().any(|name| name == "admin"));
    source.close().await.unwrap();
}

#[tokio::test]
async fn test_browse_seeded_database() {
    let name = "mongo_nav_test_browse";
    let Some((client, ids)) = seeded_client(name, 7).await else {
        eprintln!("Skipping test: MONGODB_TEST_URI not set");
        return;
    };

    let source = Arc::new(MongoDataSource::from_client(client.clone()));
    let dispatcher = CommandDispatcher::new(source);
    let mut session = Session::new();

    dispatcher.execute(&mut session, &format!("cd {name}")).await;
    assert_eq!(session.path().to_string(), name);

    dispatcher.execute(&mut session, "ls").await;
    assert_eq!(session.output(), "items\n");

    dispatcher.execute(&mut session, "cd items").await;
    dispatcher.execute(&mut session, "ls").await;
    assert_eq!(session.output().lines().count(), 6);
    assert!(session.output().ends_with("... (results truncated)\n"));

    dispatcher.execute(&mut session, "ls -la").await;
    assert_eq!(session.output().lines().count(), 7);

    let id = ids[3].to_hex();
    dispatcher.execute(&mut session, &format!("cd {id}")).await;
    dispatcher.execute(&mut session, "ls").await;
    assert!(session.error().is_none(), "{}", session.display_text());
    assert_eq!(session.output().lines().count(), 1);
    assert!(session.output().contains(&id));

    dispatcher.execute(&mut session, "cd ../000000000000000000000000").await;
    dispatcher.execute(&mut session, "ls").await;
    assert_eq!(
        session.display_text(),
        "Error: document with ID '000000000000000000000000' not found\n"
    );

    drop_database(&client, name).await;
}

#[tokio::test]
async fn test_missing_collection_on_server() {
    let name = "mongo_nav_test_missing";
    let Some((client, _)) = seeded_client(name, 1).await else {
        eprintln!("Skipping test: MONGODB_TEST_URI not set");
        return;
    };

    let dispatcher = CommandDispatcher::new(Arc::new(MongoDataSource::from_client(client.clone())));
    let mut session = Session::new();

    dispatcher.execute(&mut session, &format!("cd {name}/nope")).await;
    assert!(session.path().is_root());
    assert_eq!(
        session.display_text(),
        format!("Error: collection 'nope' does not exist in database '{name}'\n")
    );

    drop_database(&client, name).await;
}
