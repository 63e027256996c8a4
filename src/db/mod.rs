//! Database module: key-value persistence for session, credential
//! and vault records.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the `KvStorage` pool wrapper and JSON record accessors

pub mod schema;
pub mod sqlite;

pub use schema::SQLITE_INIT;
pub use sqlite::{KvStorage, SqlitePool};
