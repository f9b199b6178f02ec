//! Response envelopes and outcome classification.
//!
//! Every server response is a JSON object carrying an `errors` array of
//! strings next to the route-specific payload. [`classify`] turns an HTTP
//! status plus raw body into a typed [`Outcome`].
//!
//! Decoding policy: when the status is a success the payload must parse,
//! and a parse failure is fatal ([`Outcome::Decode`]) — a success status
//! with an unparsable body is a protocol violation, not something to
//! retry. When the status is *not* a success the body is only mined for
//! error strings; if that fails the errors list is simply empty, so a
//! secondary parse error never masks the real HTTP failure.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::types::{Court, DeviceCredential, Match, Tournament, Unit};

/// The uniform response wrapper: an error list plus a typed payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<P> {
    #[serde(default)]
    pub errors: Vec<String>,

    #[serde(flatten)]
    pub payload: P,
}

/// Classified result of one HTTP exchange.
///
/// Transport failures never reach this type: with no status code there is
/// nothing to classify, and the pipeline reports those directly.
#[derive(Debug)]
pub enum Outcome<P> {
    /// Success status and the body decoded into the expected envelope.
    Success(Envelope<P>),

    /// 400: the request was missing or malformed parameters.
    Validation { errors: Vec<String> },

    /// 403: the credential was rejected (revoked, expired or a bad
    /// signature). The caller should discard the credential.
    Auth { errors: Vec<String> },

    /// Any other non-success status; server-side or unclassified.
    Server { status: u16, errors: Vec<String> },

    /// Success status but the body did not decode. Always fatal.
    Decode { cause: String },
}

impl<P> Outcome<P> {
    /// Whether this outcome carries a decoded payload.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Classify an HTTP status and raw body into an [`Outcome`].
pub fn classify<P: DeserializeOwned>(status: u16, body: &[u8]) -> Outcome<P> {
    if (200..300).contains(&status) {
        return match serde_json::from_slice::<Envelope<P>>(body) {
            Ok(envelope) => Outcome::Success(envelope),
            Err(e) => Outcome::Decode {
                cause: e.to_string(),
            },
        };
    }

    let errors = decode_errors(body);
    match status {
        400 => Outcome::Validation { errors },
        403 => Outcome::Auth { errors },
        _ => Outcome::Server { status, errors },
    }
}

/// Pull the error strings out of a failure body, tolerating garbage.
fn decode_errors(body: &[u8]) -> Vec<String> {
    #[derive(Deserialize)]
    struct ErrorsOnly {
        #[serde(default)]
        errors: Vec<String>,
    }
    serde_json::from_slice::<ErrorsOnly>(body)
        .map(|e| e.errors)
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────
// Route payloads
// ─────────────────────────────────────────────────────────────────────────

/// Payload of the list-units route.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitList {
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Payload of the device-registration route.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRegistration {
    pub device: DeviceCredential,
}

/// Payload of the list-tournaments route.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentList {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
}

/// Payload of routes returning a list of matches.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// Payload of routes returning a single match.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleMatch {
    #[serde(rename = "match")]
    pub entry: Match,
}

/// Payload of the list-courts route.
#[derive(Debug, Clone, Deserialize)]
pub struct CourtList {
    #[serde(default)]
    pub courts: Vec<Court>,
}

/// Payload of the socket-URL route.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketUrl {
    #[serde(default)]
    pub uri: Option<String>,
}

/// Payload of routes that return only the error list.
#[derive(Debug, Clone, Deserialize)]
pub struct NoPayload {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        let body = br#"{"errors": [], "units": [{"unitid": 1, "name": "BMK"}]}"#;
        match classify::<UnitList>(200, body) {
            Outcome::Success(envelope) => {
                assert_eq!(envelope.payload.units.len(), 1);
                assert_eq!(envelope.payload.units[0].name, "BMK");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_success_with_garbage_is_decode_failure() {
        let outcome = classify::<UnitList>(200, b"<html>Internal error</html>");
        assert!(matches!(outcome, Outcome::Decode { .. }));
    }

    #[test]
    fn test_classify_validation_carries_errors() {
        let body = br#"{"errors": ["activationCode is missing", "limit must be numeric"]}"#;
        match classify::<NoPayload>(400, body) {
            Outcome::Validation { errors } => {
                assert_eq!(
                    errors,
                    vec![
                        "activationCode is missing".to_string(),
                        "limit must be numeric".to_string()
                    ]
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_forbidden_is_auth_failure() {
        assert!(matches!(
            classify::<NoPayload>(403, b"whatever"),
            Outcome::Auth { .. }
        ));
        assert!(matches!(
            classify::<NoPayload>(403, br#"{"errors": ["token revoked"]}"#),
            Outcome::Auth { errors } if errors == vec!["token revoked".to_string()]
        ));
    }

    #[test]
    fn test_classify_non_success_garbage_keeps_status_failure() {
        // An unparsable 500 body must not surface as a decode error: the
        // real failure is the status, the error list is just empty.
        match classify::<NoPayload>(500, b"<html>oops</html>") {
            Outcome::Server { status, errors } => {
                assert_eq!(status, 500);
                assert!(errors.is_empty());
            }
            other => panic!("expected server failure, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_status_keeps_errors() {
        match classify::<NoPayload>(404, br#"{"errors": ["no such route"]}"#) {
            Outcome::Server { status, errors } => {
                assert_eq!(status, 404);
                assert_eq!(errors, vec!["no such route".to_string()]);
            }
            other => panic!("expected server failure, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_defaults_errors() {
        let body = br#"{"uri": "wss://example.test/socket"}"#;
        match classify::<SocketUrl>(200, body) {
            Outcome::Success(envelope) => {
                assert!(envelope.errors.is_empty());
                assert_eq!(
                    envelope.payload.uri.as_deref(),
                    Some("wss://example.test/socket")
                );
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_quoted_numerics_coerced_through_envelope() {
        let body = br#"{"errors": [], "device": {
            "activationCode": "ABC123-01",
            "clientToken": "s3cret",
            "serverToken": "srv",
            "unit": "42",
            "expiresAt": "2026-12-31 23:59:59"
        }}"#;
        match classify::<DeviceRegistration>(200, body) {
            Outcome::Success(envelope) => assert_eq!(envelope.payload.device.unit_id, 42),
            other => panic!("expected success, got {other:?}"),
        }
    }
}
