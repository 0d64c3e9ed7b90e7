//! Shared error and result types

use thiserror::Error;

/// Errors produced across the gateway
#[derive(Error, Debug)]
pub enum LintelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Shell template error: {0}")]
    Shell(String),

    #[error("Metadata service error: {0}")]
    Api(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, LintelError>;
