//! mongo-nav - browse a MongoDB deployment like a filesystem.
//!
//! Databases, collections and documents form a three-level tree navigated
//! with `cd` and inspected with `ls`. This library exposes the core modules
//! for use by the binary and integration tests.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod tui;
