//! Path resolution and listing over the database hierarchy.
//!
//! The server is browsed as root → databases → collections → documents.
//! `PathResolver` turns `cd` targets into validated paths and `Lister`
//! renders whatever the current path points at.

mod lister;
mod path;
mod resolver;

pub use lister::{
    ListLimit, Lister, ListingEntries, ListingResult, DEFAULT_LIST_LIMIT, LIST_TIMEOUT,
    TRUNCATION_MARKER,
};
pub use path::{NavigationPath, MAX_DEPTH};
pub use resolver::{PathResolver, RESOLVE_TIMEOUT};

use crate::error::{NavigationError, Result};
use std::future::Future;
use std::time::Duration;

/// Awaits one data source call under `timeout`.
///
/// Expiry and driver errors both become `NavigationError::Backend` tagged with
/// `context`, so nothing escapes as a raw driver error.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    context: &str,
    call: impl Future<Output = Result<T>>,
) -> std::result::Result<T, NavigationError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(NavigationError::backend(context, e.to_string())),
        Err(_) => Err(NavigationError::backend(
            context,
            format!("timed out after {timeout:?}"),
        )),
    }
}
