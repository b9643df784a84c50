//! Error type for `padron-store-sqlite`.

use padron_core::{
  persona::Rut,
  store::{ErrorKind, StoreError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] padron_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Attempted to create a record whose `rut` is already stored.
  #[error("persona {0} already exists")]
  Conflict(Rut),
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Core(_) => ErrorKind::Invalid,
      Self::Database(_) => ErrorKind::Internal,
      Self::Conflict(_) => ErrorKind::Conflict,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
