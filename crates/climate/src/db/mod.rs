//! Database layer for climate data.
//!
//! This module provides the SQLite-backed implementation of the `ClimateStore`
//! trait, the row models it decodes into, and the startup schema check.

pub mod models;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

pub use models::*;
pub use schema::{verify_schema, SchemaSummary};
pub use sqlite::SqliteClimateStore;
