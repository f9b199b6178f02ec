//! Error types for the credential store.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required argument was missing or empty (caller misuse).
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// I/O error while reading or writing a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization error.
    #[error("snapshot encoding error: {0}")]
    Encode(String),

    /// Snapshot deserialization error.
    #[error("snapshot decoding error: {0}")]
    Decode(String),

    /// Snapshot was written by an unknown format version.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u8),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
