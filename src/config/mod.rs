//! Project configuration for the `picon` tool
//!
//! Provides types, discovery and parsing for `pathicon.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
