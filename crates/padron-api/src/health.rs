//! Service identity and health checks.
//!
//! `/ping` is the route a sibling instance calls; `/check-peer` calls the
//! configured sibling's `/ping`. Both checks report failures as
//! `{"error": "..."}` with a 200 status instead of failing the request.

use axum::{Json, extract::State};
use padron_core::store::PersonaStore;
use serde_json::{Value, json};

use crate::AppState;

/// `GET /`
pub async fn root<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: PersonaStore,
{
  Json(json!({
    "service": state.settings.service_name,
    "status":  "ok",
    "message": "padron debug app",
  }))
}

/// `GET /ping`
pub async fn ping<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: PersonaStore,
{
  let name = &state.settings.service_name;
  Json(json!({
    "service": name,
    "message": format!("pong desde {name}"),
  }))
}

/// `GET /check-peer`
pub async fn check_peer<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: PersonaStore,
{
  match state.peer.ping().await {
    Ok(reply) => Json(json!({
      "from":     state.settings.service_name,
      "to":       state.peer.target(),
      "status":   reply.status,
      "response": reply.body,
    })),
    Err(err) => {
      tracing::warn!(peer = %state.peer.target(), error = %err, "peer check failed");
      Json(json!({ "error": err.to_string() }))
    }
  }
}

/// `GET /check-db`
pub async fn check_db<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: PersonaStore,
{
  match state.store.liveness().await {
    Ok(live) => Json(json!({
      "status":     "ok",
      "db_status":  live.status,
      "db_version": live.version,
    })),
    Err(err) => {
      tracing::warn!(error = %err, "database check failed");
      Json(json!({ "error": err.to_string() }))
    }
  }
}
