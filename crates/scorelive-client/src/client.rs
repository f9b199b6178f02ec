//! The request pipeline: assembles, signs, dispatches and classifies
//! API calls.
//!
//! Flow for one call: copy the caller's parameters into a form body,
//! append a fresh nonce, encode once, sign the encoded bytes when a
//! credential is present, dispatch, classify the response. Any
//! non-success outcome is returned as a single error shape and, when a
//! failure sink is registered, also emitted out-of-band.
//!
//! The pipeline performs no retries and holds no credential state; the
//! calling layer decides what to do with failures and owns the store.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tracing::debug;

use scorelive_core::{
    classify, crypto, envelope::Outcome, CourtList, Court, DeviceCredential, DeviceRegistration,
    Envelope, FormBody, Match, MatchList, NoPayload, SingleMatch, SocketUrl, Tournament,
    TournamentList, Unit, UnitList,
};

use crate::error::{ApiError, ApiFailure, FailureNote};
use crate::routes::Routes;
use crate::transport::{HttpTransport, Transport, TransportConfig, WireResponse};

/// Sender half of the out-of-band failure channel.
pub type FailureSink = mpsc::UnboundedSender<FailureNote>;

/// Client for the Scoreboard Live API.
///
/// Generic over the transport so the pipeline can be exercised against a
/// scripted transport in tests; production code uses the default
/// [`HttpTransport`].
pub struct ApiClient<T = HttpTransport> {
    routes: Routes,
    transport: T,
    failure_sink: Option<FailureSink>,
}

impl ApiClient<HttpTransport> {
    /// Create a client for a server base URL with default transport
    /// configuration.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        Self::with_config(base_url, TransportConfig::default())
    }

    /// Create a client with explicit transport configuration (timeout,
    /// certificate trust, user agent).
    pub fn with_config(
        base_url: impl AsRef<str>,
        config: TransportConfig,
    ) -> Result<Self, ApiError> {
        Ok(Self::with_transport(base_url, HttpTransport::new(config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client over an explicit transport.
    pub fn with_transport(base_url: impl AsRef<str>, transport: T) -> Self {
        Self {
            routes: Routes::new(base_url),
            transport,
            failure_sink: None,
        }
    }

    /// Register an out-of-band failure sink.
    ///
    /// Every failed call additionally emits a [`FailureNote`] on this
    /// channel. Delivery is fire-and-forget: sending never blocks, a
    /// full or dropped receiver is ignored, and the error still reaches
    /// the caller unchanged.
    pub fn with_failure_sink(mut self, sink: FailureSink) -> Self {
        self.failure_sink = Some(sink);
        self
    }

    /// The route builder for this client's server.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pipeline
    // ─────────────────────────────────────────────────────────────────────

    /// Notify the failure sink (if any) and hand the error back.
    fn fail(&self, url: &str, error: ApiError) -> ApiError {
        if let ApiError::Api(failure) = &error {
            if failure.errors.is_empty() {
                // Unparsable failure bodies are swallowed by design; leave
                // a trace so operators can spot the gap.
                debug!(url, status = failure.status, "failure response carried no error detail");
            }
        }
        if let Some(sink) = &self.failure_sink {
            let _ = sink.send(FailureNote::from_error(url, &error));
        }
        error
    }

    /// Map a classified outcome to the pipeline result.
    fn finish<P>(&self, url: &str, outcome: Outcome<P>) -> Result<Envelope<P>, ApiError> {
        match outcome {
            Outcome::Success(envelope) => Ok(envelope),
            Outcome::Decode { cause } => Err(self.fail(url, ApiError::Decode(cause))),
            Outcome::Validation { errors } => Err(self.fail(
                url,
                ApiError::Api(ApiFailure {
                    status: 400,
                    errors,
                }),
            )),
            Outcome::Auth { errors } => Err(self.fail(
                url,
                ApiError::Api(ApiFailure {
                    status: 403,
                    errors,
                }),
            )),
            Outcome::Server { status, errors } => {
                Err(self.fail(url, ApiError::Api(ApiFailure { status, errors })))
            }
        }
    }

    /// POST `params` to `url`, signing when a credential is supplied.
    async fn post<P: DeserializeOwned>(
        &self,
        url: String,
        credential: Option<&DeviceCredential>,
        params: FormBody,
    ) -> Result<Envelope<P>, ApiError> {
        let response = self.dispatch(&url, credential, params).await?;
        self.finish(&url, classify::<P>(response.status, &response.body))
    }

    /// Encode, sign and send one POST, returning the raw response.
    async fn dispatch(
        &self,
        url: &str,
        credential: Option<&DeviceCredential>,
        params: FormBody,
    ) -> Result<WireResponse, ApiError> {
        // The nonce makes the encoded bytes unique per request, so a
        // signature can never be replayed.
        let body = params.with_nonce();
        let bytes: Bytes = body.encode();

        // Sign the exact bytes that go on the wire.
        let token = match credential {
            Some(credential) => Some(crypto::sign(credential, &bytes)?),
            None => None,
        };

        debug!(url, signed = token.is_some(), bytes = bytes.len(), "dispatching");
        self.transport
            .post(url, token.as_ref().map(|t| t.as_str()), bytes)
            .await
            .map_err(|e| self.fail(url, ApiError::Transport(e)))
    }

    /// Anonymous GET for the two credential-free routes.
    async fn get<P: DeserializeOwned>(&self, url: String) -> Result<Envelope<P>, ApiError> {
        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| self.fail(&url, ApiError::Transport(e)))?;
        self.finish(&url, classify::<P>(response.status, &response.body))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Endpoints
    // ─────────────────────────────────────────────────────────────────────

    /// List all units available on the server.
    pub async fn get_units(&self) -> Result<Vec<Unit>, ApiError> {
        let envelope = self.get::<UnitList>(self.routes.get_units()).await?;
        Ok(envelope.payload.units)
    }

    /// Register this device with an activation code, yielding fresh
    /// credentials. The caller is responsible for storing them.
    pub async fn register_device(
        &self,
        activation_code: &str,
    ) -> Result<DeviceCredential, ApiError> {
        let params = FormBody::from_pairs([("activationCode", activation_code)]);
        let envelope = self
            .post::<DeviceRegistration>(self.routes.register_device(), None, params)
            .await?;
        Ok(envelope.payload.device)
    }

    /// Check whether a credential is still valid on the server.
    ///
    /// Three outcomes, deliberately distinct:
    ///
    /// - success status: the credential is valid (`true`);
    /// - 403: the server explicitly rejected it (`false`) — the caller
    ///   should remove it from its store;
    /// - anything else is indeterminate and surfaces as an error, so a
    ///   transient network blip never causes a still-valid credential to
    ///   be discarded.
    pub async fn check_credentials(
        &self,
        credential: &DeviceCredential,
    ) -> Result<bool, ApiError> {
        let url = self.routes.check_registration();
        let response = self
            .dispatch(&url, Some(credential), FormBody::new())
            .await?;

        if (200..300).contains(&response.status) {
            return Ok(true);
        }
        if response.status == 403 {
            debug!(url, unit_id = credential.unit_id, "credential rejected by server");
            return Ok(false);
        }

        // Indeterminate: report the classified failure without deciding
        // anything about the credential.
        self.finish::<NoPayload>(&url, classify(response.status, &response.body))
            .map(|_| true)
    }

    /// Fetch the most recent tournaments for the credential's unit.
    pub async fn get_tournaments(
        &self,
        credential: &DeviceCredential,
        limit: u32,
    ) -> Result<Vec<Tournament>, ApiError> {
        let params = FormBody::from_pairs([("limit", limit.to_string())]);
        let envelope = self
            .post::<TournamentList>(self.routes.get_tournaments(), Some(credential), params)
            .await?;
        Ok(envelope.payload.tournaments)
    }

    /// Fetch the unit's courts.
    pub async fn get_courts(&self, credential: &DeviceCredential) -> Result<Vec<Court>, ApiError> {
        let envelope = self
            .post::<CourtList>(self.routes.get_courts(), Some(credential), FormBody::new())
            .await?;
        Ok(envelope.payload.courts)
    }

    /// Create an on-the-fly match in a tournament and return the match
    /// as the server stored it.
    pub async fn create_onthefly_match(
        &self,
        credential: &DeviceCredential,
        tournament: &Tournament,
        match_entry: &Match,
    ) -> Result<Match, ApiError> {
        let mut params =
            FormBody::from_pairs([("tournamentid", tournament.tournament_id.to_string())]);
        for (key, value) in match_entry.form_fields() {
            params.push(key, value);
        }
        let envelope = self
            .post::<SingleMatch>(self.routes.create_onthefly_match(), Some(credential), params)
            .await?;
        Ok(envelope.payload.entry)
    }

    /// Assign a match to a court.
    pub async fn assign_match_to_court(
        &self,
        credential: &DeviceCredential,
        match_entry: &Match,
        court: &Court,
    ) -> Result<(), ApiError> {
        let match_id = match_entry.match_id.ok_or(ApiError::Missing("match id"))?;
        let params = FormBody::from_pairs([
            ("matchid", match_id.to_string()),
            ("courtid", court.court_id.to_string()),
        ]);
        self.post::<NoPayload>(self.routes.assign_match_to_court(), Some(credential), params)
            .await?;
        Ok(())
    }

    /// Find matches by tournament match number.
    pub async fn find_match_by_sequence_number(
        &self,
        credential: &DeviceCredential,
        tournament: &Tournament,
        sequence_number: u32,
    ) -> Result<Vec<Match>, ApiError> {
        let params = FormBody::from_pairs([
            ("tournamentid", tournament.tournament_id.to_string()),
            ("sequencenumber", sequence_number.to_string()),
        ]);
        let envelope = self
            .post::<MatchList>(self.routes.get_match_by_matchnumber(), Some(credential), params)
            .await?;
        Ok(envelope.payload.matches)
    }

    /// Find matches by content tag (see
    /// [`Match::content_tag`](scorelive_core::Match::content_tag)).
    pub async fn find_match_by_tag(
        &self,
        credential: &DeviceCredential,
        tag: &str,
    ) -> Result<Vec<Match>, ApiError> {
        let params = FormBody::from_pairs([("tag", tag)]);
        let envelope = self
            .post::<MatchList>(self.routes.get_match_by_tag(), Some(credential), params)
            .await?;
        Ok(envelope.payload.matches)
    }

    /// Get the push-socket URL, when the server exposes one.
    pub async fn get_socket_url(&self) -> Result<Option<String>, ApiError> {
        let envelope = self.get::<SocketUrl>(self.routes.get_socket_url()).await?;
        Ok(envelope.payload.uri)
    }
}
