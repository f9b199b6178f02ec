//! Key store trait: the abstract interface for credential persistence.
//!
//! The trait covers the single-domain view; the concrete
//! [`DomainKeyStore`](crate::DomainKeyStore) adds domain-qualified
//! variants on top of it.
//!
//! # Design Notes
//!
//! - **Copies out, ownership in**: `get` hands back a copy; the store
//!   exclusively owns its entries and callers never mutate shared state.
//! - **Replace on set**: at most one credential per unit id; setting a
//!   new credential for an existing unit replaces the old one.
//! - **Not internally synchronized**: concurrent mutation of one store
//!   instance must be serialized by the caller (single-writer
//!   discipline). The remove-then-append write pattern is not atomic
//!   across concurrent mutators.

use scorelive_core::DeviceCredential;

use crate::error::Result;

/// Abstract credential storage keyed by unit id.
pub trait KeyStore {
    /// Look up the credential for a unit. Returns a copy, or `None` when
    /// the unit has no credential.
    fn get(&self, unit_id: u32) -> Option<DeviceCredential>;

    /// Insert a credential, replacing any existing credential for the
    /// same unit id.
    fn set(&mut self, credential: DeviceCredential) -> Result<()>;

    /// Remove the credential matching this credential's unit id. No-op
    /// when absent.
    fn remove(&mut self, credential: &DeviceCredential);
}
