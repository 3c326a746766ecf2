//! Connection establishment tests.
//!
//! These never need a server: they exercise the failure paths.

use mongo_nav::config::ConnectionConfig;
use mongo_nav::db::{self, MongoDataSource};
use mongo_nav::error::MongoNavError;
use tokio_test::assert_err;

#[tokio::test(flavor = "current_thread")]
async fn test_connect_to_closed_port_fails() {
    let config = ConnectionConfig {
        uri: Some("mongodb://127.0.0.1:1/?directConnection=true".to_string()),
        connect_timeout_secs: 1,
    };

    let error = assert_err!(MongoDataSource::connect(&config).await);
    assert!(matches!(error, MongoNavError::Connection(_)), "{error}");
    assert_eq!(error.category(), "Connection Error");
}

#[tokio::test(flavor = "current_thread")]
async fn test_connect_with_malformed_uri_fails() {
    let config = ConnectionConfig {
        uri: Some("mongodb://host:notaport".to_string()),
        connect_timeout_secs: 1,
    };

    let Err(error) = db::connect(&config).await else {
        panic!("connecting with a malformed URI should fail");
    };
    assert!(
        error.to_string().contains("Invalid connection string"),
        "Expected a parse failure, got: {error}"
    );
}
