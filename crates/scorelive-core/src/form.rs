//! Form-encoded request bodies.
//!
//! The server accepts `application/x-www-form-urlencoded` bodies. The
//! encoding here is hand-rolled and deterministic so that the bytes the
//! signature engine sees are exactly the bytes the transport sends:
//! pair order is preserved, unreserved bytes pass through, space becomes
//! `+`, everything else becomes `%XX` with uppercase hex.
//!
//! Every outbound body carries a random nonce under the reserved
//! [`NONCE_KEY`] key. Two otherwise-identical requests therefore never
//! produce byte-identical bodies, and never reuse a signature.

use bytes::Bytes;

/// Reserved body key carrying the anti-replay nonce.
pub const NONCE_KEY: &str = "randomStuff";

/// An ordered set of key/value pairs destined for a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    /// Create an empty body.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Create a body from existing pairs, preserving their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append a key/value pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append a fresh random nonce under [`NONCE_KEY`] and return the body.
    pub fn with_nonce(mut self) -> Self {
        self.push(NONCE_KEY, fresh_nonce());
        self
    }

    /// The pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the body holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Encode to the exact bytes that go on the wire (and into the HMAC).
    pub fn encode(&self) -> Bytes {
        let mut buf = Vec::with_capacity(self.pairs.iter().map(|(k, v)| k.len() + v.len() + 2).sum());
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                buf.push(b'&');
            }
            escape_into(&mut buf, key);
            buf.push(b'=');
            escape_into(&mut buf, value);
        }
        Bytes::from(buf)
    }
}

/// Generate a fresh nonce: 16 random bytes as 32 lowercase hex characters.
pub fn fresh_nonce() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Percent-escape one component into `buf`.
fn escape_into(buf: &mut Vec<u8>, s: &str) {
    const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => buf.push(b),
            b' ' => buf.push(b'+'),
            _ => {
                buf.push(b'%');
                buf.push(UPPER_HEX[(b >> 4) as usize]);
                buf.push(UPPER_HEX[(b & 0x0f) as usize]);
            }
        }
    }
}
