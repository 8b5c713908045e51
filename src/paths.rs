//! Project path functions - single source of truth for file locations.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! Lesson content lives under `{DATA_DIR}/lessons` unless `CONTENT_DIR`
//! or `config.toml` says otherwise (see config.rs).

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Static assets served under /static
pub const STATIC_DIR: &str = "static";

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
  DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Default lesson content directory
pub fn lessons_dir() -> String {
  format!("{}/lessons", data_dir())
}
