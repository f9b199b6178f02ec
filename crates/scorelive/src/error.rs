//! Error types for the session layer.

use scorelive_client::ApiError;
use scorelive_store::StoreError;
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The request pipeline failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The credential store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No credential is stored for this unit in the session's domain.
    #[error("no stored credential for unit {0}")]
    MissingCredential(u32),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
