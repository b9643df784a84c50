//! Endpoints that misbehave on purpose, for exercising failure tooling.
//!
//! None of these recover from anything. `/crash` ends the process and
//! `/memory-leak` never gives memory back.

use std::{
  collections::BTreeMap,
  sync::{Arc, Mutex, PoisonError},
};

use axum::{Json, extract::State, http::HeaderMap};
use padron_core::store::PersonaStore;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

/// Each leaked chunk is this string repeated [`CHUNK_REPEAT`] times (~4 KB).
const CHUNK: &str = "leak";
const CHUNK_REPEAT: usize = 1000;

// ─── Ballast ─────────────────────────────────────────────────────────────────

/// Memory the leak endpoint accumulates. Owned by [`AppState`]; nothing ever
/// removes from it.
#[derive(Debug, Default)]
pub struct Ballast {
  chunks: Mutex<Vec<String>>,
}

impl Ballast {
  pub fn new() -> Self { Self::default() }

  /// Append `chunks` more chunks and return the total retained.
  pub fn inflate(&self, chunks: usize) -> usize {
    let mut retained =
      self.chunks.lock().unwrap_or_else(PoisonError::into_inner);
    for _ in 0..chunks {
      retained.push(CHUNK.repeat(CHUNK_REPEAT));
    }
    retained.len()
  }

  #[cfg(test)]
  pub(crate) fn retained(&self) -> usize {
    self.chunks.lock().unwrap_or_else(PoisonError::into_inner).len()
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `GET /env`
///
/// Every process environment variable, unfiltered.
pub async fn env() -> Json<Value> {
  let vars: BTreeMap<String, String> = std::env::vars_os()
    .map(|(k, v)| {
      (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned())
    })
    .collect();
  Json(json!({ "env": vars }))
}

/// `GET /headers`
pub async fn headers(headers: HeaderMap) -> Json<Value> {
  let headers: BTreeMap<String, String> = headers
    .iter()
    .map(|(name, value)| {
      (
        name.as_str().to_owned(),
        String::from_utf8_lossy(value.as_bytes()).into_owned(),
      )
    })
    .collect();
  Json(json!({ "headers": headers }))
}

/// `GET /error` — panics; the panic layer turns it into a 500.
pub async fn error() -> Json<Value> {
  tracing::warn!("raising a deliberate failure");
  panic!("deliberate failure for debugging");
}

/// `GET /timeout` — holds the request for the configured hang duration.
pub async fn timeout<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: PersonaStore,
{
  let hang = state.settings.hang;
  tracing::warn!(?hang, "delaying response on purpose");
  tokio::time::sleep(hang).await;
  Json(json!({
    "message":    "this endpoint was deliberately slow",
    "slept_secs": hang.as_secs_f64(),
  }))
}

/// `GET /crash`
pub async fn crash() {
  tracing::error!("terminating the process on request");
  std::process::exit(1);
}

/// `GET /memory-leak` — grows the ballast by the configured number of chunks.
pub async fn memory_leak<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: PersonaStore,
{
  let ballast = Arc::clone(&state.ballast);
  let chunks = state.settings.leak_iterations;
  tracing::warn!(chunks, "leaking memory on purpose");

  let retained =
    tokio::task::spawn_blocking(move || ballast.inflate(chunks)).await?;

  Ok(Json(json!({
    "message":  "memory deliberately consumed",
    "retained": retained,
  })))
}
