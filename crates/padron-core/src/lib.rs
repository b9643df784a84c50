//! Core types and trait definitions for the padron person registry.
//!
//! Free of HTTP and database dependencies; every other crate builds on it.

pub mod error;
pub mod field;
pub mod patch;
pub mod persona;
pub mod store;

pub use error::{Error, Result};
