//! # Scorelive Store
//!
//! Persistence for issued device credentials. Provides a trait-based
//! interface over an in-memory, domain-partitioned table with versioned
//! snapshot files.
//!
//! ## Overview
//!
//! The store owns every credential it holds; callers get copies out and
//! hand ownership in. Entries are partitioned by a domain string (one
//! domain per server), so a single store file can serve several servers
//! without unit-id collisions.
//!
//! ## Key Types
//!
//! - [`KeyStore`] - The abstract get/set/remove interface
//! - [`DomainKeyStore`] - The concrete domain-partitioned implementation
//! - [`StoreError`] - Store failure taxonomy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scorelive_store::{DomainKeyStore, KeyStore};
//!
//! let mut store = DomainKeyStore::load("keys.bin").unwrap();
//! if let Some(credential) = store.get(17) {
//!     println!("already registered: {credential}");
//! }
//! store.save("keys.bin").unwrap();
//! ```
//!
//! ## Design Notes
//!
//! - **Replace on set**: one credential per `(domain, unit id)`; the
//!   latest set wins.
//! - **Missing file on load**: yields a fresh empty store, not an error.
//! - **Versioned snapshots**: the file carries a format version byte so
//!   cross-version behavior is testable (see [`snapshot`]).
//! - **Not internally synchronized**: single-writer discipline is the
//!   caller's responsibility.

pub mod error;
pub mod local;
pub mod snapshot;
pub mod traits;

pub use error::{Result, StoreError};
pub use local::{DomainKeyStore, DEFAULT_DOMAIN};
pub use snapshot::{CURRENT_VERSION, SNAPSHOT_MAGIC};
pub use traits::KeyStore;
