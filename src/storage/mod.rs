//! Storage layer for the footdata CLI
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Row structs for the six persisted entities
//! - `schema`: Database connection and schema management
//! - `queries`: Batch upsert operations

pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::Database;
