pub mod collections;
pub mod progress;
pub mod schema;
pub mod store;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use collections::*;
pub use progress::*;
pub use schema::run_migrations;
pub use store::{CollectionStore, ProgressStore, SqliteStore};

pub type DbPool = Arc<Mutex<Connection>>;

/// Errors raised by the collection and progress stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("Invalid stored card: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Database unavailable")]
  Lock,

  #[error("Collection not found: {0}")]
  CollectionNotFound(String),

  #[error("Card not found: {0}")]
  CardNotFound(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }

  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    self.log_warn(context).unwrap_or_default()
  }
}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> StoreResult<MutexGuard<'_, Connection>> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    StoreError::Lock
  })
}

pub fn init_db(path: &Path) -> rusqlite::Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).log_warn("Could not create data directory");
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    std::fs::copy(path, &backup_path).log_warn("Could not create database backup");
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Fresh migrated in-memory database
pub fn open_in_memory() -> rusqlite::Result<DbPool> {
  let conn = Connection::open_in_memory()?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}
