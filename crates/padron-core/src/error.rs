//! Error types for `padron-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown field: {0:?}")]
  UnknownField(String),

  #[error("field {0:?} cannot be changed")]
  ImmutableField(String),

  #[error("invalid value for {field}: {message}")]
  InvalidValue {
    field:   &'static str,
    message: String,
  },

  #[error("{field} {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
