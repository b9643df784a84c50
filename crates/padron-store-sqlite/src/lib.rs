//! SQLite backend for the padron person registry.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The registry table lives in an attached
//! database named `bdi`, so it is addressed as `bdi.persona_natural`.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
