//! Common error types for gigboard

use thiserror::Error;

/// Common result type for gigboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the gigboard crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    ///
    /// Covers insert/update/delete failures during commit: constraint
    /// violations, connection loss, etc. Mutations roll their unit of
    /// work back before surfacing this.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found (fetch-by-id yielded no row)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input, detected before attempting persistence
    /// (malformed phone number, missing required field)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
