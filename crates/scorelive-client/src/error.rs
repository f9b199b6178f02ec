//! Error types and failure notifications for the request pipeline.

use std::fmt;

use scorelive_core::CoreError;
use thiserror::Error;

/// The HTTP call itself failed (DNS, TCP, TLS, timeout): no status code
/// was obtained, so there is nothing to classify.
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError(e.to_string())
    }
}

/// A server-reported failure: the HTTP status plus the structured error
/// list decoded from the response body.
///
/// One shape covers validation failures (400), credential rejections
/// (403) and unclassified server failures, so callers inspect a single
/// type for everything the server reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub errors: Vec<String>,
}

impl ApiFailure {
    /// Whether this failure means the credential should be discarded.
    pub fn is_auth_failure(&self) -> bool {
        self.status == 403
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server returned status {}", self.status)?;
        for error in &self.errors {
            write!(f, "\n - {error}")?;
        }
        Ok(())
    }
}

/// Errors surfaced by the request pipeline.
///
/// No failure is retried or silently recovered; each is surfaced to the
/// caller exactly once.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Signing failed before dispatch (caller misuse).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Success status but the body did not decode into the expected
    /// envelope. A protocol violation, not a retryable condition.
    #[error("response decode failure: {0}")]
    Decode(String),

    /// The server reported a failure; see [`ApiFailure`].
    #[error("{0}")]
    Api(ApiFailure),

    /// A required value was absent on the caller's side.
    #[error("missing required value: {0}")]
    Missing(&'static str),
}

/// Stage at which a request failed, for out-of-band listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// No response was obtained.
    Connection,
    /// The response body could not be decoded.
    Decode,
    /// The server reported a non-success status.
    Http,
}

/// Out-of-band failure notification.
///
/// Sent on the pipeline's optional notification channel whenever a call
/// fails, in addition to (never instead of) the error returned to the
/// caller. Delivery is fire-and-forget: a slow or absent listener cannot
/// delay or alter the caller's outcome, and delivery is not guaranteed
/// to complete before process exit.
#[derive(Debug, Clone)]
pub struct FailureNote {
    /// The full URL of the failed request.
    pub url: String,
    pub stage: FailureStage,
    /// HTTP status, when one was obtained.
    pub status: Option<u16>,
    /// Structured errors decoded from the response, when present.
    pub errors: Vec<String>,
    /// Rendered error message.
    pub message: String,
}

impl FailureNote {
    /// Build a note describing `error` for a request to `url`.
    pub fn from_error(url: &str, error: &ApiError) -> Self {
        let (stage, status, errors) = match error {
            ApiError::Transport(_) => (FailureStage::Connection, None, Vec::new()),
            ApiError::Decode(_) => (FailureStage::Decode, None, Vec::new()),
            ApiError::Api(failure) => (
                FailureStage::Http,
                Some(failure.status),
                failure.errors.clone(),
            ),
            ApiError::Core(_) | ApiError::Missing(_) => (FailureStage::Connection, None, Vec::new()),
        };
        Self {
            url: url.to_string(),
            stage,
            status,
            errors,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_failure_message_lists_every_error() {
        let failure = ApiFailure {
            status: 400,
            errors: vec!["first reason".into(), "second reason".into()],
        };
        let rendered = failure.to_string();
        assert!(rendered.contains("400"));
        assert!(rendered.contains("\n - first reason"));
        assert!(rendered.contains("\n - second reason"));
    }

    #[test]
    fn test_api_failure_message_without_errors() {
        let failure = ApiFailure {
            status: 500,
            errors: vec![],
        };
        assert_eq!(failure.to_string(), "server returned status 500");
    }

    #[test]
    fn test_failure_note_stages() {
        let transport = ApiError::Transport(TransportError("connection refused".into()));
        assert_eq!(
            FailureNote::from_error("https://x/", &transport).stage,
            FailureStage::Connection
        );

        let api = ApiError::Api(ApiFailure {
            status: 403,
            errors: vec!["revoked".into()],
        });
        let note = FailureNote::from_error("https://x/", &api);
        assert_eq!(note.stage, FailureStage::Http);
        assert_eq!(note.status, Some(403));
        assert_eq!(note.errors, vec!["revoked".to_string()]);
    }
}
