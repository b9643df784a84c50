//! Handlers for `/personas` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/personas` | Optional `?offset` (default 0) and `?limit` (default 10); ordered by `rut` |
//! | `POST`   | `/personas` | Body: a full [`Persona`]; returns 201 + stored record, 409 if `rut` is taken |
//! | `GET`    | `/personas/{rut}` | The record, or `null` |
//! | `PATCH`  | `/personas/{rut}` | Body: `{"<column>": <value>, ...}`; returns the updated record, or `null` |
//! | `DELETE` | `/personas/{rut}` | `{"deleted": true\|false}` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use padron_core::{
  patch::PersonaPatch,
  persona::{Page, Persona, Rut},
  store::PersonaStore,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /personas[?offset=<n>][&limit=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(page): Query<Page>,
) -> Result<Json<Vec<Persona>>, ApiError>
where
  S: PersonaStore,
{
  let personas = state.store.list(page).await.map_err(ApiError::from_store)?;
  Ok(Json(personas))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /personas/{rut}` — a missing record is `null`, not a 404.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(rut): Path<Rut>,
) -> Result<Json<Option<Persona>>, ApiError>
where
  S: PersonaStore,
{
  let persona = state.store.get(rut).await.map_err(ApiError::from_store)?;
  Ok(Json(persona))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /personas` — returns 201 + the stored [`Persona`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<Persona>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonaStore,
{
  let persona = state.store.create(body).await.map_err(ApiError::from_store)?;
  tracing::info!(rut = persona.rut, "persona created");
  Ok((StatusCode::CREATED, Json(persona)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /personas/{rut}` — only the columns present in the body change.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(rut): Path<Rut>,
  Json(body): Json<Map<String, Value>>,
) -> Result<Json<Option<Persona>>, ApiError>
where
  S: PersonaStore,
{
  let patch = PersonaPatch::from_json(body)?;
  let persona = state
    .store
    .update(rut, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(persona))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
  pub deleted: bool,
}

/// `DELETE /personas/{rut}` — deleting a missing record is not an error.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(rut): Path<Rut>,
) -> Result<Json<Deleted>, ApiError>
where
  S: PersonaStore,
{
  let deleted = state.store.delete(rut).await.map_err(ApiError::from_store)?;
  if deleted {
    tracing::info!(rut, "persona deleted");
  }
  Ok(Json(Deleted { deleted }))
}
