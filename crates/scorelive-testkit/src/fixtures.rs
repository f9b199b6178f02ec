//! Test fixtures and canned response bodies.
//!
//! Common setup code for exercising the pipeline against the scripted
//! transport without a server.

use rand::Rng;

use scorelive_client::transport::scripted::ScriptedTransport;
use scorelive_client::ApiClient;
use scorelive_core::{wire, DeviceCredential};
use scorelive_store::DomainKeyStore;

/// Build a credential with the given device code, secret and unit id.
pub fn credential_with(device_code: &str, secret: &str, unit_id: u32) -> DeviceCredential {
    DeviceCredential {
        device_code: device_code.to_string(),
        client_secret: secret.to_string(),
        server_token: format!("server-token-{unit_id}"),
        unit_id,
        expires_at: wire::parse_datetime("2030-01-01 00:00:00")
            .expect("fixture timestamp is valid"),
    }
}

/// Build a plausible credential for a unit.
pub fn test_credential(unit_id: u32) -> DeviceCredential {
    credential_with(
        &format!("DEV{unit_id:04}"),
        &format!("secret-for-{unit_id}"),
        unit_id,
    )
}

/// A random six-character activation code, the shape units hand out.
pub fn random_activation_code() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────
// Canned response bodies
// ─────────────────────────────────────────────────────────────────────────

/// A body carrying only an error list.
pub fn errors_body(errors: &[&str]) -> String {
    serde_json::json!({ "errors": errors }).to_string()
}

/// A units listing.
pub fn units_body(units: &[(u32, &str)]) -> String {
    let units: Vec<_> = units
        .iter()
        .map(|(unit_id, name)| serde_json::json!({ "unitid": unit_id, "name": name }))
        .collect();
    serde_json::json!({ "errors": [], "units": units }).to_string()
}

/// A successful device registration. The device code is derived from the
/// activation code and the unit id arrives quoted, as the server sends it.
pub fn device_body(activation_code: &str, unit_id: u32) -> String {
    serde_json::json!({
        "errors": [],
        "device": {
            "activationCode": format!("{activation_code}-01"),
            "clientToken": format!("issued-{activation_code}"),
            "serverToken": "server-token",
            "unit": unit_id.to_string(),
            "expiresAt": "2026-12-31 23:59:59",
        }
    })
    .to_string()
}

/// A tournaments listing.
pub fn tournaments_body(entries: &[(u32, &str)]) -> String {
    let tournaments: Vec<_> = entries
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "tournamentid": id,
                "name": name,
                "type": "individual",
                "startdate": "2026-08-01",
                "enddate": "2026-08-02",
            })
        })
        .collect();
    serde_json::json!({ "errors": [], "tournaments": tournaments }).to_string()
}

/// A courts listing.
pub fn courts_body(entries: &[(u32, &str)]) -> String {
    let courts: Vec<_> = entries
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "courtid": id,
                "name": name,
                "venue": { "venueid": 1, "name": "Hall A" },
            })
        })
        .collect();
    serde_json::json!({ "errors": [], "courts": courts }).to_string()
}

/// A socket-URL response.
pub fn socket_body(uri: &str) -> String {
    serde_json::json!({ "errors": [], "uri": uri }).to_string()
}

// ─────────────────────────────────────────────────────────────────────────
// Fixture
// ─────────────────────────────────────────────────────────────────────────

/// A ready-to-use scripted client plus an empty store.
pub struct TestFixture {
    pub transport: ScriptedTransport,
    pub client: ApiClient<ScriptedTransport>,
    pub store: DomainKeyStore,
}

impl TestFixture {
    /// Create a fixture against a fixed test base URL.
    pub fn new() -> Self {
        Self::with_base_url("https://scoreboard.test")
    }

    /// Create a fixture against a specific base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        let transport = ScriptedTransport::new();
        let client = ApiClient::with_transport(base_url, transport.clone());
        Self {
            transport,
            client,
            store: DomainKeyStore::new(),
        }
    }
}

impl TestFixture {
    /// Turn the fixture into a [`Session`](scorelive::Session) over its
    /// scripted transport and store.
    pub fn into_session(self) -> scorelive::Session<ScriptedTransport> {
        scorelive::Session::with_client(self.client, self.store)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
