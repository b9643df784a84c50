//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use padron_core::store::{ErrorKind, StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("background task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl ApiError {
  /// Classify a backend error by its [`ErrorKind`].
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.kind() {
      ErrorKind::Conflict => Self::Conflict(err.to_string()),
      ErrorKind::Invalid => Self::BadRequest(err.to_string()),
      ErrorKind::Internal => {
        tracing::warn!(error = %err, "store operation failed");
        Self::Store(Box::new(err))
      }
    }
  }
}

impl From<padron_core::Error> for ApiError {
  fn from(err: padron_core::Error) -> Self { Self::BadRequest(err.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Task(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
