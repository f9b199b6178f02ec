//! The domain-partitioned credential store.
//!
//! One store instance can safely hold credentials for multiple distinct
//! servers: entries are partitioned by a domain string (typically the
//! server's base URL), so identical unit ids on different servers never
//! collide. When no domain is given, operations fall back to the store's
//! configured default domain.

use std::collections::BTreeMap;

use scorelive_core::DeviceCredential;

use crate::error::{Result, StoreError};
use crate::traits::KeyStore;

/// Domain used when the caller does not partition by server.
pub const DEFAULT_DOMAIN: &str = "default";

/// In-memory table of device credentials, partitioned by domain, with
/// snapshot persistence (see [`crate::snapshot`]).
///
/// Invariant: at most one credential per `(domain, unit_id)` pair. A set
/// for an existing unit id replaces the previous credential.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainKeyStore {
    pub(crate) domains: BTreeMap<String, Vec<DeviceCredential>>,
    default_domain: String,
}

impl DomainKeyStore {
    /// Create an empty store with the [`DEFAULT_DOMAIN`].
    pub fn new() -> Self {
        Self {
            domains: BTreeMap::new(),
            default_domain: DEFAULT_DOMAIN.to_string(),
        }
    }

    /// Change the default domain used by the un-qualified operations.
    pub fn with_default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    /// The domain used by the un-qualified operations.
    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// Look up a credential in a specific domain.
    pub fn get_in(&self, domain: &str, unit_id: u32) -> Option<DeviceCredential> {
        self.domains
            .get(domain)?
            .iter()
            .find(|credential| credential.unit_id == unit_id)
            .cloned()
    }

    /// Insert a credential into a specific domain, replacing any existing
    /// credential for the same unit id. The replacement is a remove of
    /// all unit-id matches followed by an append, so a reader between
    /// calls (there must be none; see [`KeyStore`]) never sees two
    /// entries for one unit.
    pub fn set_in(&mut self, domain: &str, credential: DeviceCredential) -> Result<()> {
        if domain.is_empty() {
            return Err(StoreError::MissingArgument("domain"));
        }
        if credential.device_code.is_empty() {
            return Err(StoreError::MissingArgument("credential"));
        }

        let entries = self.domains.entry(domain.to_string()).or_default();
        entries.retain(|existing| existing.unit_id != credential.unit_id);
        entries.push(credential);
        Ok(())
    }

    /// Remove the credential for this credential's unit id from a
    /// specific domain. No-op when the domain or unit is absent.
    pub fn remove_in(&mut self, domain: &str, credential: &DeviceCredential) {
        if let Some(entries) = self.domains.get_mut(domain) {
            entries.retain(|existing| existing.unit_id != credential.unit_id);
            if entries.is_empty() {
                self.domains.remove(domain);
            }
        }
    }

    /// All domains currently holding at least one credential.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// The credentials stored in one domain, in insertion order.
    pub fn credentials_in(&self, domain: &str) -> &[DeviceCredential] {
        self.domains.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of stored credentials across all domains.
    pub fn len(&self) -> usize {
        self.domains.values().map(Vec::len).sum()
    }

    /// Whether the store holds no credentials at all.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for DomainKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for DomainKeyStore {
    fn get(&self, unit_id: u32) -> Option<DeviceCredential> {
        self.get_in(&self.default_domain, unit_id)
    }

    fn set(&mut self, credential: DeviceCredential) -> Result<()> {
        let domain = self.default_domain.clone();
        self.set_in(&domain, credential)
    }

    fn remove(&mut self, credential: &DeviceCredential) {
        let domain = self.default_domain.clone();
        self.remove_in(&domain, credential);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(unit_id: u32, device_code: &str) -> DeviceCredential {
        serde_json::from_value(serde_json::json!({
            "activationCode": device_code,
            "clientToken": format!("secret-{unit_id}"),
            "serverToken": "srv",
            "unit": unit_id,
            "expiresAt": "2030-01-01 00:00:00",
        }))
        .unwrap()
    }

    #[test]
    fn test_get_on_empty_store_is_absent() {
        let store = DomainKeyStore::new();
        assert!(store.get(1).is_none());
        assert!(store.get_in("elsewhere", 1).is_none());
    }

    #[test]
    fn test_set_then_get_default_domain() {
        let mut store = DomainKeyStore::new();
        store.set(credential(7, "A")).unwrap();

        let found = store.get(7).unwrap();
        assert_eq!(found.device_code, "A");
        // The default-domain view and the qualified view agree.
        assert_eq!(store.get_in(DEFAULT_DOMAIN, 7), Some(found));
    }

    #[test]
    fn test_set_replaces_same_unit() {
        let mut store = DomainKeyStore::new();
        store.set(credential(7, "old")).unwrap();
        store.set(credential(7, "new")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(7).unwrap().device_code, "new");
    }

    #[test]
    fn test_same_unit_different_domains_do_not_collide() {
        let mut store = DomainKeyStore::new();
        store.set_in("https://a.example/", credential(7, "on-a")).unwrap();
        store.set_in("https://b.example/", credential(7, "on-b")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_in("https://a.example/", 7).unwrap().device_code, "on-a");
        assert_eq!(store.get_in("https://b.example/", 7).unwrap().device_code, "on-b");
        assert!(store.get(7).is_none());
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut store = DomainKeyStore::new();
        let cred = credential(7, "A");
        store.remove(&cred);
        assert!(store.is_empty());

        store.set(cred.clone()).unwrap();
        store.remove_in("other-domain", &cred);
        assert_eq!(store.len(), 1);

        store.remove(&cred);
        assert!(store.get(7).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_domain_rejected() {
        let mut store = DomainKeyStore::new();
        assert!(matches!(
            store.set_in("", credential(1, "A")),
            Err(StoreError::MissingArgument("domain"))
        ));
    }

    #[test]
    fn test_empty_device_code_rejected() {
        let mut store = DomainKeyStore::new();
        assert!(matches!(
            store.set(credential(1, "")),
            Err(StoreError::MissingArgument("credential"))
        ));
    }

    #[test]
    fn test_custom_default_domain() {
        let mut store = DomainKeyStore::new().with_default_domain("https://dosan.example/");
        store.set(credential(3, "C")).unwrap();

        assert_eq!(
            store.get_in("https://dosan.example/", 3).unwrap().device_code,
            "C"
        );
        assert!(store.get_in(DEFAULT_DOMAIN, 3).is_none());
    }
}
