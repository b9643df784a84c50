//! HTTP surface for the padron debug app.
//!
//! Exposes an axum [`Router`] backed by any [`PersonaStore`]: CRUD over
//! `persona_natural` records plus health, peer and fault-injection routes.
//! Binding, configuration loading and process setup belong to the binary.
//!
//! | Method | Path | Module |
//! |--------|------|--------|
//! | `GET`  | `/` | [`health::root`] |
//! | `GET`  | `/ping` | [`health::ping`] |
//! | `GET`  | `/check-peer` | [`health::check_peer`] |
//! | `GET`  | `/check-db` | [`health::check_db`] |
//! | `*`    | `/personas`, `/personas/{rut}` | [`personas`] |
//! | `GET`  | `/env`, `/headers`, `/error`, `/timeout`, `/crash`, `/memory-leak` | [`debug`] |

pub mod debug;
pub mod error;
pub mod health;
pub mod peer;
pub mod personas;

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use padron_core::store::PersonaStore;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use debug::Ballast;
pub use error::ApiError;
pub use peer::PeerClient;

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Per-instance behaviour knobs read by the handlers.
#[derive(Debug, Clone)]
pub struct Settings {
  /// Label reported by `/`, `/ping` and `/check-peer`.
  pub service_name:    String,
  /// How long `/timeout` holds a request.
  pub hang:            Duration,
  /// Chunks appended per `/memory-leak` call.
  pub leak_iterations: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      service_name:    "A".to_owned(),
      hang:            Duration::from_secs(15),
      leak_iterations: 10_000_000,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:    Arc<S>,
  pub peer:     Arc<PeerClient>,
  pub ballast:  Arc<Ballast>,
  pub settings: Arc<Settings>,
}

impl<S> AppState<S> {
  /// State with an empty [`Ballast`].
  pub fn new(store: S, peer: PeerClient, settings: Settings) -> Self {
    Self {
      store:    Arc::new(store),
      peer:     Arc::new(peer),
      ballast:  Arc::new(Ballast::new()),
      settings: Arc::new(settings),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      peer:     Arc::clone(&self.peer),
      ballast:  Arc::clone(&self.ballast),
      settings: Arc::clone(&self.settings),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `state`.
///
/// A panicking handler becomes a 500 response instead of tearing down the
/// connection.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PersonaStore + 'static,
{
  Router::new()
    // Health
    .route("/",            get(health::root::<S>))
    .route("/ping",        get(health::ping::<S>))
    .route("/check-peer",  get(health::check_peer::<S>))
    .route("/check-db",    get(health::check_db::<S>))
    // Personas
    .route(
      "/personas",
      get(personas::list::<S>).post(personas::create::<S>),
    )
    .route(
      "/personas/{rut}",
      get(personas::get_one::<S>)
        .patch(personas::update::<S>)
        .delete(personas::delete::<S>),
    )
    // Debug
    .route("/env",         get(debug::env))
    .route("/headers",     get(debug::headers))
    .route("/error",       get(debug::error))
    .route("/timeout",     get(debug::timeout::<S>))
    .route("/crash",       get(debug::crash))
    .route("/memory-leak", get(debug::memory_leak::<S>))
    .with_state(state)
    .layer(CatchPanicLayer::new())
    .layer(TraceLayer::new_for_http())
}
