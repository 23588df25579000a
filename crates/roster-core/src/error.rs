//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown gender: {0:?}")]
  UnknownGender(String),

  #[error("unknown marital status: {0:?}")]
  UnknownMaritalStatus(String),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
