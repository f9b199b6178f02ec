//! The Session: API client and credential store working together.
//!
//! The pipeline itself never touches the store; this layer owns the
//! credential lifecycle around it: registration stores the issued
//! credential, an explicit server-side rejection removes it, and an
//! indeterminate failure leaves it alone.

use std::path::Path;

use tracing::{debug, info};

use scorelive_client::{ApiClient, HttpTransport, Transport, TransportConfig};
use scorelive_core::DeviceCredential;
use scorelive_store::DomainKeyStore;

use crate::error::{Result, SessionError};

/// A client session against one server, with credential bookkeeping.
///
/// The store partition (domain) defaults to the server's normalized base
/// URL, so one snapshot file can serve several servers without unit-id
/// collisions.
pub struct Session<T: Transport = HttpTransport> {
    client: ApiClient<T>,
    store: DomainKeyStore,
    domain: String,
}

impl Session<HttpTransport> {
    /// Create a session for a server with default transport
    /// configuration.
    pub fn new(base_url: impl AsRef<str>, store: DomainKeyStore) -> Result<Self> {
        Ok(Self::with_client(ApiClient::new(base_url)?, store))
    }

    /// Create a session with explicit transport configuration.
    pub fn with_config(
        base_url: impl AsRef<str>,
        config: TransportConfig,
        store: DomainKeyStore,
    ) -> Result<Self> {
        Ok(Self::with_client(
            ApiClient::with_config(base_url, config)?,
            store,
        ))
    }
}

impl<T: Transport> Session<T> {
    /// Build a session over an existing client.
    pub fn with_client(client: ApiClient<T>, store: DomainKeyStore) -> Self {
        let domain = client.routes().base_url().to_string();
        Self {
            client,
            store,
            domain,
        }
    }

    /// Override the store partition used for this session's credentials.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// The underlying API client, for calls beyond credential handling.
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// The credential store.
    pub fn store(&self) -> &DomainKeyStore {
        &self.store
    }

    /// Mutable access to the credential store.
    pub fn store_mut(&mut self) -> &mut DomainKeyStore {
        &mut self.store
    }

    /// The store partition this session reads and writes.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The stored credential for a unit, if any.
    pub fn credential_for(&self, unit_id: u32) -> Option<DeviceCredential> {
        self.store.get_in(&self.domain, unit_id)
    }

    /// Register this device with an activation code and store the issued
    /// credential, replacing any previous credential for the same unit.
    pub async fn register(&mut self, activation_code: &str) -> Result<DeviceCredential> {
        let credential = self.client.register_device(activation_code).await?;
        info!(
            unit_id = credential.unit_id,
            domain = %self.domain,
            "registered device, storing credential"
        );
        self.store.set_in(&self.domain, credential.clone())?;
        Ok(credential)
    }

    /// Check whether the stored credential for a unit is still valid.
    ///
    /// On an explicit rejection the credential is removed from the store
    /// and `false` is returned. On an indeterminate failure (transport,
    /// server error) the error propagates and the credential is kept: a
    /// network blip must not cost a still-valid registration.
    pub async fn validate(&mut self, unit_id: u32) -> Result<bool> {
        let credential = self
            .credential_for(unit_id)
            .ok_or(SessionError::MissingCredential(unit_id))?;

        let valid = self.client.check_credentials(&credential).await?;
        if !valid {
            debug!(unit_id, domain = %self.domain, "removing rejected credential");
            self.store.remove_in(&self.domain, &credential);
        }
        Ok(valid)
    }

    /// Persist the credential store to a snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.store.save(path)?;
        Ok(())
    }
}
