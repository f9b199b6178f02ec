//! # Scorelive Core
//!
//! Pure primitives for the Scoreboard Live SDK: wire types, request
//! signing, form encoding, and response classification.
//!
//! This crate contains no I/O and no networking. It is pure computation
//! over the data that crosses the wire, which keeps the authentication
//! invariant testable: the bytes that are signed are the bytes that are
//! sent.
//!
//! ## Key Types
//!
//! - [`DeviceCredential`] - The device-code/secret pair identifying one
//!   authorized device
//! - [`FormBody`] - Ordered form-encoded request body carrying the
//!   anti-replay nonce
//! - [`AuthToken`] - `device code + hex(HMAC-SHA256(body))`
//! - [`Envelope`] / [`Outcome`] - The uniform response wrapper and its
//!   classification
//!
//! ## Signing
//!
//! ```rust
//! use scorelive_core::{sign, FormBody};
//! # use scorelive_core::DeviceCredential;
//! # let credential: DeviceCredential = serde_json::from_str(
//! #     r#"{"activationCode":"AB","clientToken":"k","serverToken":"s",
//! #         "unit":1,"expiresAt":"2030-01-01 00:00:00"}"#).unwrap();
//!
//! let body = FormBody::from_pairs([("limit", "10")]).with_nonce();
//! let bytes = body.encode();
//! let token = sign(&credential, &bytes).unwrap();
//! assert!(token.as_str().starts_with("AB"));
//! ```

pub mod codes;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod form;
pub mod types;
pub mod wire;

pub use codes::{Category, ScoreSystem, Special, TournamentType};
pub use crypto::{sign, sign_text, AuthToken};
pub use envelope::{
    classify, CourtList, DeviceRegistration, Envelope, MatchList, NoPayload, Outcome, SingleMatch,
    SocketUrl, TournamentList, UnitList,
};
pub use error::CoreError;
pub use form::{fresh_nonce, FormBody, NONCE_KEY};
pub use types::{Court, DeviceCredential, Link, Match, PlayerRef, Tournament, TournamentClass, Unit, Venue};
