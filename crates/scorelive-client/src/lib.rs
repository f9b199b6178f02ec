//! # Scorelive Client
//!
//! The authenticated request pipeline for the Scoreboard Live API.
//!
//! ## Overview
//!
//! Every call follows the same path: caller parameters are copied into a
//! form body, a fresh anti-replay nonce is appended, the body is encoded
//! once, the encoded bytes are signed (when a credential is supplied)
//! and dispatched, and the response is classified into a typed result or
//! a single uniform error shape.
//!
//! ## Key Types
//!
//! - [`ApiClient`] - The pipeline plus typed endpoint methods
//! - [`Transport`] - The seam between pipeline and HTTP; swap in the
//!   scripted transport for tests
//! - [`ApiError`] / [`ApiFailure`] - The failure taxonomy
//! - [`FailureNote`] - Out-of-band failure notification
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use scorelive_client::{ApiClient, TransportConfig};
//!
//! async fn example() {
//!     let config = TransportConfig {
//!         timeout: Duration::from_secs(10),
//!         ..TransportConfig::default()
//!     };
//!     let client = ApiClient::with_config("https://dosan.scoreboardlive.se", config).unwrap();
//!
//!     let units = client.get_units().await.unwrap();
//!     let device = client.register_device("ABC123").await.unwrap();
//!     let valid = client.check_credentials(&device).await.unwrap();
//!     assert!(valid);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **One encoding**: the bytes that are signed are the bytes that are
//!   sent; the body is never re-serialized after signing.
//! - **No retries**: every failure is surfaced to the caller exactly
//!   once; the caller decides whether to retry.
//! - **Construction-time transport config**: timeout and certificate
//!   trust are fixed when the client is built, not per call.

pub mod client;
pub mod error;
pub mod routes;
pub mod transport;

pub use client::{ApiClient, FailureSink};
pub use error::{ApiError, ApiFailure, FailureNote, FailureStage, TransportError};
pub use routes::Routes;
pub use transport::{HttpTransport, Transport, TransportConfig, WireResponse, FORM_CONTENT_TYPE};
