//! Error type for `roster-store-sqlite`.

use roster_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// The UNIQUE index on the case-folded email rejected a write.
  #[error("email already in use: {0}")]
  DuplicateEmail(String),
}

impl StoreError for Error {
  fn is_duplicate_email(&self) -> bool { matches!(self, Self::DuplicateEmail(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
