//! Application data layer
//!
//! MongoDB client wrapper and document schemas. Lintel declares schema
//! shapes and indexes; record lifecycle is owned by the app backend.

pub mod mongo;
pub mod schemas;

pub use mongo::{IntoIndexes, MongoClient, MongoCollection};
