//! Integration tests for mongo-nav.

pub mod connection_test;
pub mod live_test;
pub mod navigation_test;
