//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `PUBLIC_DIR`: Override the static front-end directory (default: "public")
//! - `PORT`: Override the server port (see config.rs)
//!
//! This allows running isolated server instances side by side:
//! ```bash
//! DATA_DIR=data/test PORT=3001 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Lazily initialized static directory from PUBLIC_DIR env var
static PUBLIC_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
  DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Directory served as the front-end (from PUBLIC_DIR env var or default "public")
pub fn public_dir() -> &'static str {
  PUBLIC_DIR_VALUE.get_or_init(|| env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()))
}

/// SQLite database holding collections and learning progress
pub fn db_path() -> String {
  format!("{}/lingomem.db", data_dir())
}

#[cfg(test)]
mod tests {
  use super::*;

  // OnceLock initializes once, so env overrides can't be exercised here.

  #[test]
  fn test_data_dir_default() {
    let dir = data_dir();
    assert!(!dir.is_empty());
  }

  #[test]
  fn test_db_path_format() {
    let path = db_path();
    assert!(path.ends_with("/lingomem.db"));
    assert!(path.starts_with(data_dir()));
  }

  #[test]
  fn test_public_dir_is_stable() {
    assert_eq!(public_dir(), public_dir());
  }
}
