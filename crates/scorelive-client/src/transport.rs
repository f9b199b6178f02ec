//! Transport abstraction for the request pipeline.
//!
//! The transport delivers already-encoded bytes and hands back the raw
//! status and body; it knows nothing about signing or envelopes. The
//! production implementation wraps `reqwest`; a scripted in-memory
//! implementation lives in [`scripted`] for tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::error::TransportError;

/// Content type for form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Construction-time transport configuration. Neither knob can be
/// changed per call.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Bound on the total duration of one request.
    pub timeout: Duration,

    /// Skip certificate verification. Development endpoints only; the
    /// connection is open to interception when this is set.
    pub accept_invalid_certs: bool,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            user_agent: concat!("scorelive/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Raw result of one HTTP exchange: a status code and the body bytes.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Transport trait for dispatching requests.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a form-encoded body, optionally with an `Authorization`
    /// header, and return the response once fully read.
    async fn post(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: Bytes,
    ) -> Result<WireResponse, TransportError>;

    /// GET without body or credentials.
    async fn get(&self, url: &str) -> Result<WireResponse, TransportError>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent)
            .build()
            .map_err(TransportError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: Bytes,
    ) -> Result<WireResponse, TransportError> {
        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        if let Some(token) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::from)?;
        Ok(WireResponse { status, body })
    }

    async fn get(&self, url: &str) -> Result<WireResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::from)?;
        Ok(WireResponse { status, body })
    }
}

/// A scripted transport for testing.
///
/// Responses are queued up front and popped in order; every dispatched
/// request is recorded for inspection. Cloning shares the script and the
/// request log.
pub mod scripted {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// One request as the transport saw it.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub authorization: Option<String>,
        pub body: Bytes,
    }

    #[derive(Default)]
    struct Inner {
        script: Mutex<VecDeque<Result<WireResponse, TransportError>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    /// In-memory transport returning canned responses.
    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        inner: Arc<Inner>,
    }

    impl ScriptedTransport {
        /// Create a transport with an empty script.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response with the given status and body.
        pub fn push_response(&self, status: u16, body: impl Into<Bytes>) {
            self.inner
                .script
                .lock()
                .unwrap()
                .push_back(Ok(WireResponse {
                    status,
                    body: body.into(),
                }));
        }

        /// Queue a transport-level failure.
        pub fn push_error(&self, message: impl Into<String>) {
            self.inner
                .script
                .lock()
                .unwrap()
                .push_back(Err(TransportError(message.into())));
        }

        /// All requests dispatched so far, in order.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.inner.requests.lock().unwrap().clone()
        }

        fn dispatch(&self, request: RecordedRequest) -> Result<WireResponse, TransportError> {
            self.inner.requests.lock().unwrap().push(request);
            self.inner
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("scripted transport exhausted".into())))
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post(
            &self,
            url: &str,
            authorization: Option<&str>,
            body: Bytes,
        ) -> Result<WireResponse, TransportError> {
            self.dispatch(RecordedRequest {
                method: "POST",
                url: url.to_string(),
                authorization: authorization.map(String::from),
                body,
            })
        }

        async fn get(&self, url: &str) -> Result<WireResponse, TransportError> {
            self.dispatch(RecordedRequest {
                method: "GET",
                url: url.to_string(),
                authorization: None,
                body: Bytes::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedTransport;
    use super::*;

    #[tokio::test]
    async fn test_scripted_transport_pops_in_order() {
        let transport = ScriptedTransport::new();
        transport.push_response(200, r#"{"errors":[]}"#);
        transport.push_response(403, "");

        let first = transport.get("http://x/a").await.unwrap();
        assert_eq!(first.status, 200);
        let second = transport.get("http://x/b").await.unwrap();
        assert_eq!(second.status, 403);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "http://x/a");
        assert_eq!(requests[1].url, "http://x/b");
    }

    #[tokio::test]
    async fn test_scripted_transport_exhausted_is_transport_error() {
        let transport = ScriptedTransport::new();
        assert!(transport.get("http://x/").await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_transport_records_post_details() {
        let transport = ScriptedTransport::new();
        transport.push_response(200, "{}");

        transport
            .post("http://x/api", Some("TOKEN"), Bytes::from_static(b"a=1"))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].authorization.as_deref(), Some("TOKEN"));
        assert_eq!(&requests[0].body[..], b"a=1");
    }
}
