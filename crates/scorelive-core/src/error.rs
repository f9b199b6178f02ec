//! Error types for the core primitives.

use thiserror::Error;

/// Errors that can occur in the pure core: signing, encoding, decoding.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A credential without a client secret cannot sign anything.
    #[error("credential has no client secret")]
    MissingSecret,

    /// A wire code (category, score system, ...) had an unknown value.
    #[error("unknown {kind} code: {value:?}")]
    UnknownCode {
        kind: &'static str,
        value: String,
    },

    /// A server timestamp string did not match the expected format.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Response body could not be decoded into the expected shape.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// Request body could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}
