//! Golden signature vectors.
//!
//! The expected digests are the HMAC-SHA256 test vectors from RFC 4231
//! (restricted to the cases whose keys are valid UTF-8, since client
//! secrets are strings). They pin the token construction — device code
//! prefix, lowercase hex, full 64 digits — against any platform or
//! refactoring drift.

use scorelive_core::{sign, DeviceCredential};

/// A golden signature test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Device code prefixed to the token.
    pub device_code: &'static str,
    /// Client secret (HMAC key).
    pub secret: String,
    /// Body bytes to sign.
    pub body: &'static [u8],
    /// Expected HMAC-SHA256 digest, lowercase hex.
    pub expected_digest: &'static str,
}

impl GoldenVector {
    /// The full expected token: device code + digest.
    pub fn expected_token(&self) -> String {
        format!("{}{}", self.device_code, self.expected_digest)
    }

    /// A credential carrying this vector's device code and secret.
    pub fn credential(&self) -> DeviceCredential {
        crate::fixtures::credential_with(self.device_code, &self.secret, 1)
    }
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "rfc4231-case-1",
            device_code: "UNIT1",
            secret: "\u{0b}".repeat(20),
            body: b"Hi There",
            expected_digest: "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
        },
        GoldenVector {
            name: "rfc4231-case-2",
            device_code: "DEVX",
            secret: "Jefe".to_string(),
            body: b"what do ya want for nothing?",
            expected_digest: "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
        },
        GoldenVector {
            name: "rfc4231-case-6-long-key",
            device_code: "LONGKEY",
            secret: "a".repeat(131),
            body: b"Test Using Larger Than Block-Size Key - Hash Key First",
            expected_digest: "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54",
        },
    ]
}

/// Verify every golden vector, returning the first mismatch.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let token = sign(&vector.credential(), vector.body)
            .map_err(|e| format!("{}: signing failed: {e}", vector.name))?;
        if token.as_str() != vector.expected_token() {
            return Err(format!(
                "{}: expected {}, got {}",
                vector.name,
                vector.expected_token(),
                token
            ));
        }
    }
    Ok(())
}
