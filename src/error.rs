//! Crate-wide error type for Agora.
//!
//! Subsystems with richer failure modes (registration, sessions, the write
//! policy) carry their own error enums; this type covers storage, I/O, and
//! configuration failures that cut across modules.

use thiserror::Error;

/// Common error type for Agora.
#[derive(Error, Debug)]
pub enum AgoraError {
    /// Storage failure. sqlx errors convert into this losing only the type.
    #[error("database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input, including unparseable configuration files.
    #[error("validation error: {0}")]
    Validation(String),

    /// A named resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Bad or incomplete server configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for AgoraError {
    fn from(e: sqlx::Error) -> Self {
        AgoraError::Database(e.to_string())
    }
}

/// Result type alias for Agora operations.
pub type Result<T> = std::result::Result<T, AgoraError>;
