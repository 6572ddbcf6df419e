//! Persistence Module
//!
//! SQLite pool setup and the property repository.

mod connection;
mod property_repo;

pub use connection::{connect, ensure_schema};
pub use property_repo::{PropertyRepository, SqlitePropertyRepository};
