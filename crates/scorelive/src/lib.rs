//! # Scorelive
//!
//! Client SDK for the Scoreboard Live tournament-scoreboard service.
//!
//! ## Overview
//!
//! The SDK is built from three layers:
//!
//! - **Core**: wire types, form encoding, HMAC-SHA256 request signing,
//!   response classification. Pure computation, no I/O.
//! - **Store**: a domain-partitioned table of issued device credentials
//!   with versioned snapshot files.
//! - **Client**: the request pipeline — nonce, signature, dispatch,
//!   classification — plus typed endpoint methods.
//!
//! [`Session`] ties the client and store together for the credential
//! lifecycle: register-and-store, validate-and-discard-on-rejection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scorelive::{DomainKeyStore, Session};
//!
//! async fn example() {
//!     let store = DomainKeyStore::load("keys.bin").unwrap();
//!     let mut session = Session::new("https://dosan.scoreboardlive.se", store).unwrap();
//!
//!     // Register once, then reuse the stored credential.
//!     let credential = match session.credential_for(17) {
//!         Some(credential) => credential,
//!         None => session.register("ABC123").await.unwrap(),
//!     };
//!
//!     // An explicit rejection removes the credential from the store;
//!     // a transient failure leaves it in place.
//!     if session.validate(credential.unit_id).await.unwrap() {
//!         let tournaments = session
//!             .client()
//!             .get_tournaments(&credential, 10)
//!             .await
//!             .unwrap();
//!         println!("{} tournaments", tournaments.len());
//!     }
//!
//!     session.save("keys.bin").unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! The component crates are re-exported for convenience:
//!
//! - `scorelive::core` - Wire types and signing
//! - `scorelive::store` - Credential store
//! - `scorelive::client` - Request pipeline

pub mod error;
pub mod session;

// Re-export component crates
pub use scorelive_client as client;
pub use scorelive_core as core;
pub use scorelive_store as store;

// Re-export main types for convenience
pub use error::SessionError;
pub use session::Session;

// Re-export commonly used component types
pub use scorelive_client::{
    ApiClient, ApiError, ApiFailure, FailureNote, FailureStage, Routes, Transport, TransportConfig,
};
pub use scorelive_core::{
    Category, Court, DeviceCredential, FormBody, Match, ScoreSystem, Special, Tournament,
    TournamentType, Unit, Venue,
};
pub use scorelive_store::{DomainKeyStore, KeyStore, StoreError};
