//! The `PersonaStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `padron-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  patch::PersonaPatch,
  persona::{Page, Persona, Rut},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Coarse classification of a backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A record with the same `rut` already exists.
  Conflict,
  /// The input violated a column constraint.
  Invalid,
  /// Anything else: connectivity, I/O, corrupt rows.
  Internal,
}

/// Implemented by backend error types so callers can react to a failure
/// without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

// ─── Liveness ────────────────────────────────────────────────────────────────

/// Result of the trivial liveness query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
  /// The value returned by `SELECT 1`.
  pub status:  i64,
  /// Backend version string.
  pub version: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Data access for `persona_natural` records.
///
/// Every method is a single atomic unit against the store; nothing spans
/// multiple calls. A missing `rut` is never an error: lookups and updates
/// yield `None`, deletes yield `false`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonaStore: Send + Sync {
  type Error: StoreError;

  /// Insert a new record and return it as stored.
  ///
  /// Fails with an [`ErrorKind::Conflict`] error if `rut` is already taken.
  fn create(
    &self,
    persona: Persona,
  ) -> impl Future<Output = Result<Persona, Self::Error>> + Send + '_;

  /// Records ordered ascending by `rut`, windowed by `page`.
  ///
  /// A window past the end of the data yields an empty vec.
  fn list(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Persona>, Self::Error>> + Send + '_;

  /// Retrieve a record by `rut`. Returns `None` if not found.
  fn get(
    &self,
    rut: Rut,
  ) -> impl Future<Output = Result<Option<Persona>, Self::Error>> + Send + '_;

  /// Write only the columns named in `patch` and return the updated record,
  /// or `None` if no record has this `rut`.
  fn update(
    &self,
    rut: Rut,
    patch: PersonaPatch,
  ) -> impl Future<Output = Result<Option<Persona>, Self::Error>> + Send + '_;

  /// Remove a record. Returns whether a row was actually removed.
  fn delete(
    &self,
    rut: Rut,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Run a trivial query to confirm the store is reachable.
  fn liveness(
    &self,
  ) -> impl Future<Output = Result<Liveness, Self::Error>> + Send + '_;
}
