//! # Scorelive Testkit
//!
//! Testing utilities for the Scoreboard Live SDK.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: known signature test cases with expected tokens
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: credentials, canned response bodies, and a scripted
//!   client ready to exercise the pipeline without a server
//!
//! ## Golden Vectors
//!
//! ```rust
//! use scorelive_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use scorelive_testkit::fixtures::{device_body, TestFixture};
//!
//! # async fn example() {
//! let fixture = TestFixture::new();
//! fixture.transport.push_response(200, device_body("QX42PZ", 9));
//! let device = fixture.client.register_device("QX42PZ").await.unwrap();
//! # }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{test_credential, TestFixture};
pub use generators::credential;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
