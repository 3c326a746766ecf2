//! End-to-end shell sessions over an in-memory server.

use mongo_nav::commands::CommandDispatcher;
use mongo_nav::db::{Document, MockDataSource, ObjectId};
use mongo_nav::navigation::{Lister, PathResolver};
use mongo_nav::session::Session;
use mongodb::bson::doc;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const KNOWN_ID: &str = "64b7f0a1c2d3e4f5a6b7c8d9";

fn known_id() -> ObjectId {
    ObjectId::parse_str(KNOWN_ID).unwrap()
}

fn server() -> MockDataSource {
    let mut source = MockDataSource::new().with_database("admin");
    for name in ["c1", "c2", "c3", "c4", "c5", "c6", "c7"] {
        source = source.with_collection("shop", name);
    }
    source
        .with_documents(
            "shop",
            "orders",
            [
                doc! { "_id": known_id(), "n": 1 },
                doc! { "n": 2 },
                doc! { "n": 3 },
            ],
        )
        .with_database("local")
}

struct Shell {
    dispatcher: CommandDispatcher,
    session: Session,
    source: Arc<MockDataSource>,
}

impl Shell {
    fn new(source: MockDataSource) -> Self {
        let source = Arc::new(source);
        Self {
            dispatcher: CommandDispatcher::new(source.clone()),
            session: Session::new(),
            source,
        }
    }

    async fn run(&mut self, line: &str) -> String {
        self.dispatcher.execute(&mut self.session, line).await;
        self.session.display_text()
    }

    fn path(&self) -> String {
        self.session.path().to_string()
    }
}

#[tokio::test]
async fn test_browse_from_root_to_document() {
    let mut shell = Shell::new(server());

    assert_eq!(shell.run("ls").await, "admin\nshop\nlocal\n");

    shell.run("cd shop/orders").await;
    assert_eq!(shell.path(), "shop/orders");

    let listing = shell.run("ls -la").await;
    assert_eq!(listing.lines().count(), 3);
    assert!(!listing.contains("truncated"));

    shell.run(&format!("cd {KNOWN_ID}")).await;
    assert_eq!(shell.path(), format!("shop/orders/{KNOWN_ID}"));
    let document = shell.run("ls").await;
    assert_eq!(document.lines().count(), 1);
    assert!(document.contains(KNOWN_ID));

    shell.run("cd ../../..").await;
    assert_eq!(shell.path(), "/");
}

#[tokio::test]
async fn test_cd_admin_from_root() {
    let mut shell = Shell::new(server());
    assert_eq!(shell.run("cd admin").await, "");
    assert_eq!(shell.path(), "admin");
}

#[tokio::test]
async fn test_ls_truncates_collection_names() {
    let mut shell = Shell::new(server());
    shell.run("cd shop").await;

    assert_eq!(
        shell.run("ls").await,
        "c1\nc2\nc3\nc4\nc5\n... (results truncated)\n"
    );
    assert_eq!(shell.run("ls -la").await.lines().count(), 8);
}

#[tokio::test]
async fn test_exactly_five_names_are_not_truncated() {
    let mut source = MockDataSource::new();
    for name in ["a", "b", "c", "d", "e"] {
        source = source.with_database(name);
    }
    let mut shell = Shell::new(source);
    assert_eq!(shell.run("ls").await, "a\nb\nc\nd\ne\n");
}

#[tokio::test]
async fn test_missing_document_is_reported_on_listing() {
    let mut shell = Shell::new(server());
    shell.run("cd shop/orders/64b7f0a1c2d3e4f5a6b7c8da").await;
    assert_eq!(shell.path(), "shop/orders/64b7f0a1c2d3e4f5a6b7c8da");

    assert_eq!(
        shell.run("ls").await,
        "Error: document with ID '64b7f0a1c2d3e4f5a6b7c8da' not found\n"
    );
    assert_eq!(shell.path(), "shop/orders/64b7f0a1c2d3e4f5a6b7c8da");
}

#[tokio::test]
async fn test_malformed_document_id_never_reaches_server() {
    let mut shell = Shell::new(server());
    shell.run("cd shop/orders/not-an-id").await;
    let calls = shell.source.call_count();

    assert_eq!(shell.run("ls").await, "Error: invalid document ID: not-an-id\n");
    assert_eq!(shell.source.call_count(), calls);
}

#[tokio::test]
async fn test_unknown_command() {
    let mut shell = Shell::new(server());
    shell.run("cd admin").await;
    assert_eq!(shell.run("foo").await, "Error: unknown command: foo\n");
    assert_eq!(shell.path(), "admin");

    // Next success clears the error
    assert_eq!(shell.run("cd ..").await, "");
    assert_eq!(shell.path(), "/");
}

#[tokio::test]
async fn test_cd_alone_resets_everything() {
    let mut shell = Shell::new(server());
    shell.run("cd shop/orders").await;
    shell.run("cd ../../nowhere").await;
    assert!(shell.session.error().is_some());
    assert_eq!(shell.path(), "shop/orders");

    assert_eq!(shell.run("cd").await, "");
    assert_eq!(shell.path(), "/");
    assert!(shell.session.error().is_none());
}

#[tokio::test]
async fn test_cd_up_from_root_is_noop() {
    let mut shell = Shell::new(server());
    assert_eq!(shell.run("cd ..").await, "");
    assert_eq!(shell.path(), "/");
}

#[tokio::test]
async fn test_navigation_errors_keep_path() {
    let mut shell = Shell::new(server());
    shell.run("cd shop").await;

    assert_eq!(
        shell.run("cd nope").await,
        "Error: collection 'nope' does not exist in database 'shop'\n"
    );
    assert_eq!(shell.path(), "shop");
}

#[tokio::test]
async fn test_too_deep_path_fails_on_listing() {
    let mut shell = Shell::new(server());
    shell.run("cd shop/c1/a/b").await;
    assert_eq!(shell.path(), "shop/c1/a/b");
    assert_eq!(shell.run("ls").await, "Error: invalid path depth\n");
}

#[tokio::test]
async fn test_regex_database_segment() {
    let mut shell = Shell::new(server());
    shell.run("cd sh.p").await;
    assert_eq!(shell.path(), "sh.p");
    assert!(shell.session.error().is_none());

    let error = shell.run("cd ../[").await;
    assert!(error.starts_with("Error: invalid pattern '['"), "{error}");
    assert_eq!(shell.path(), "sh.p");
}

#[tokio::test]
async fn test_collections_are_checked_under_typed_database() {
    let mut shell = Shell::new(server());

    // "sh.p" matches "shop", but `ls` would query "sh.p", so the cd fails
    assert_eq!(
        shell.run("cd sh.p/orders").await,
        "Error: collection 'orders' does not exist in database 'sh.p'\n"
    );
    assert_eq!(shell.path(), "/");

    shell.run("cd shop/ord.*").await;
    assert_eq!(shell.path(), "shop/ord.*");
    assert!(shell.session.error().is_none());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let source: Arc<MockDataSource> =
        Arc::new(server().with_latency(Duration::from_millis(200)));
    let dispatcher = CommandDispatcher::with_components(
        PathResolver::new(source.clone()).with_timeout(Duration::from_millis(20)),
        Lister::new(source).with_timeout(Duration::from_millis(20)),
    );
    let mut session = Session::new();

    dispatcher.execute(&mut session, "cd admin").await;
    assert!(session.path().is_root());
    assert!(session.display_text().contains("timed out"));

    dispatcher.execute(&mut session, "ls").await;
    assert!(session.display_text().contains("timed out"));
}

#[tokio::test]
async fn test_document_listing_renders_one_line_each() {
    let documents: Vec<Document> = (0..3).map(|n| doc! { "n": n, "tags": ["a", "b"] }).collect();
    let mut shell = Shell::new(MockDataSource::new().with_documents("db", "c", documents));
    shell.run("cd db/c").await;

    let listing = shell.run("ls").await;
    assert_eq!(listing.lines().count(), 3);
    assert!(listing.lines().all(|line| line.starts_with('{') && line.ends_with('}')));
}
