//! pathicon - Stroke-path icon registry and animated icon element
//!
//! This library provides:
//! - A shared icon registry publishing one hidden symbol per icon
//! - The `<path-icon>` element with layered draw-in animation
//! - Validation and loading of JSON/JSON5 icon configuration files
//! - The `picon` command-line tool and optional WASM bindings

pub mod cli;
pub mod config;
pub mod dom;
pub mod element;
pub mod host;
pub mod icons;
pub mod models;
pub mod registry;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;
