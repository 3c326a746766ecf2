//! TUI widgets for mongo-nav.

pub mod header;
pub mod input;
pub mod output;
