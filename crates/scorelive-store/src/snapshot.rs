//! Versioned snapshot persistence for the credential store.
//!
//! A snapshot is a small framed file:
//!
//! ```text
//! [0..4)  magic  b"SBKS"
//! [4]     format version (currently 1)
//! [5..]   CBOR map: domain -> [credential records]
//! ```
//!
//! The explicit version byte makes compatibility across store versions a
//! testable property instead of an implicit one: an unknown version is
//! rejected with [`StoreError::UnsupportedVersion`], never misread.
//! Loading a missing file yields a fresh empty store.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use scorelive_core::DeviceCredential;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::local::DomainKeyStore;

/// File magic identifying a credential snapshot.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"SBKS";

/// Current snapshot format version.
pub const CURRENT_VERSION: u8 = 1;

impl DomainKeyStore {
    /// Serialize the full domain mapping to a snapshot file, replacing
    /// any existing file at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = encode_snapshot(&self.domains)?;

        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;

        debug!(
            path = %path.display(),
            domains = self.domains.len(),
            credentials = self.len(),
            "saved credential snapshot"
        );
        Ok(())
    }

    /// Load a store from a snapshot file.
    ///
    /// A missing file is not an error: it yields a fresh empty store, so
    /// first runs need no special casing. The default domain is
    /// construction-time configuration and is not part of the snapshot;
    /// apply [`DomainKeyStore::with_default_domain`] after loading when a
    /// non-standard default is wanted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot file, starting empty");
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        let domains = decode_snapshot(&bytes)?;

        let mut store = Self::new();
        store.domains = domains;
        debug!(
            path = %path.display(),
            credentials = store.len(),
            "loaded credential snapshot"
        );
        Ok(store)
    }
}

fn encode_snapshot(domains: &BTreeMap<String, Vec<DeviceCredential>>) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(64);
    bytes.extend_from_slice(&SNAPSHOT_MAGIC);
    bytes.push(CURRENT_VERSION);
    ciborium::into_writer(domains, &mut bytes).map_err(|e| StoreError::Encode(e.to_string()))?;
    Ok(bytes)
}

fn decode_snapshot(bytes: &[u8]) -> Result<BTreeMap<String, Vec<DeviceCredential>>> {
    if bytes.len() < SNAPSHOT_MAGIC.len() + 1 || bytes[..4] != SNAPSHOT_MAGIC {
        return Err(StoreError::Decode("not a credential snapshot".into()));
    }

    match bytes[4] {
        1 => ciborium::from_reader(&bytes[5..]).map_err(|e| StoreError::Decode(e.to_string())),
        other => Err(StoreError::UnsupportedVersion(other)),
    }
}
