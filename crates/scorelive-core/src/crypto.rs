//! Request signing for the Scoreboard Live API.
//!
//! Every authenticated request carries an `Authorization` token computed
//! as the device code concatenated with the lowercase hex HMAC-SHA256
//! digest of the request body, keyed by the credential's client secret.
//!
//! The digest is taken over the *exact* bytes put on the wire. Signing a
//! re-serialized copy that differs byte-for-byte produces a token the
//! server will reject, so callers must encode the body once and pass
//! those bytes both here and to the transport.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

use crate::error::CoreError;
use crate::types::DeviceCredential;

type HmacSha256 = Hmac<Sha256>;

/// An authorization token: `<device code><64 lowercase hex digits>`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// The token as a header-ready string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, yielding the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken({})", self.0)
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sign a request body with a device credential.
///
/// Pure and deterministic: the same credential and bytes always produce
/// the same token, which is what makes idempotent retries (decided by the
/// caller) and golden-vector testing possible.
///
/// # Errors
///
/// Returns [`CoreError::MissingSecret`] when the credential carries an
/// empty client secret.
pub fn sign(credential: &DeviceCredential, body: &[u8]) -> Result<AuthToken, CoreError> {
    if credential.client_secret.is_empty() {
        return Err(CoreError::MissingSecret);
    }

    let mut mac = HmacSha256::new_from_slice(credential.client_secret.as_bytes())
        .expect("hmac accepts any key length");
    mac.update(body);
    let digest = mac.finalize().into_bytes();

    let mut token = String::with_capacity(credential.device_code.len() + digest.len() * 2);
    token.push_str(&credential.device_code);
    token.push_str(&hex::encode(digest));
    Ok(AuthToken(token))
}

/// Sign an arbitrary textual payload (UTF-8 encoded).
///
/// Produces the same token as [`sign`] for identical encoded content.
pub fn sign_text(credential: &DeviceCredential, text: &str) -> Result<AuthToken, CoreError> {
    sign(credential, text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(secret: &str) -> DeviceCredential {
        DeviceCredential {
            device_code: "DEV42".to_string(),
            client_secret: secret.to_string(),
            server_token: "srv".to_string(),
            unit_id: 1,
            expires_at: crate::wire::parse_datetime("2030-01-01 00:00:00").unwrap(),
        }
    }

    #[test]
    fn test_sign_deterministic() {
        let cred = credential("topsecret");
        let t1 = sign(&cred, b"a=1&b=2").unwrap();
        let t2 = sign(&cred, b"a=1&b=2").unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_sign_shape() {
        let cred = credential("topsecret");
        let token = sign(&cred, b"payload").unwrap();
        let token = token.as_str();

        assert!(token.starts_with("DEV42"));
        let digest = &token["DEV42".len()..];
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_differs_per_body() {
        let cred = credential("topsecret");
        let t1 = sign(&cred, b"nonce=aaaa").unwrap();
        let t2 = sign(&cred, b"nonce=bbbb").unwrap();
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_sign_empty_secret_rejected() {
        let cred = credential("");
        assert!(matches!(
            sign(&cred, b"payload"),
            Err(CoreError::MissingSecret)
        ));
    }

    #[test]
    fn test_sign_text_matches_byte_form() {
        let cred = credential("topsecret");
        let body = "limit=10&randomStuff=c0ffee";
        let from_text = sign_text(&cred, body).unwrap();
        let from_bytes = sign(&cred, body.as_bytes()).unwrap();
        assert_eq!(from_text, from_bytes);
    }

    #[test]
    fn test_sign_known_vector() {
        // HMAC-SHA256 test vector from RFC 4231 (case 2): key "Jefe",
        // message "what do ya want for nothing?".
        let mut cred = credential("Jefe");
        cred.device_code = "AB".to_string();
        let token = sign(&cred, b"what do ya want for nothing?").unwrap();
        assert_eq!(
            token.as_str(),
            "AB5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
