//! SQLite storage layer for credsim.
//!
//! Provides the data store behind the HTTP API: people keyed by CPF and the
//! credit simulations that reference them.
//!
//! # Architecture
//!
//! - [`DataStore`] is the seam the request handlers depend on
//! - [`SqliteStore`] implements it over a single `rusqlite` connection
//! - Check-then-act operations (delete, update) run in one transaction
//! - The schema is created on open; deleting a person cascades to its simulations

mod error;
mod sqlite;
mod store;

pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStore;
pub use store::DataStore;
