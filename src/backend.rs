use async_trait::async_trait;
use axum::http::{Method, header::CONTENT_TYPE};
use serde_json::Value;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{error::ActionError, models::ApiEnvelope};

/// BackendRequest
///
/// One call to the backend REST API. `token` is the session token, forwarded
/// as a bearer credential when present.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub token: Option<String>,
}

impl BackendRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

// 1. Backend Contract
/// Backend
///
/// Transport to the REST API. Implementations return the envelope's `data`
/// (`None` when it is absent or null) or the reason the call failed.
/// Single attempt, no retries.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, request: BackendRequest) -> Result<Option<Value>, ActionError>;
}

/// BackendState
///
/// The shared handle stored in `AppState`.
pub type BackendState = Arc<dyn Backend>;

/// Parses a `{code, message?, data}` envelope and rejects non-success codes.
pub fn unwrap_envelope(bytes: &[u8]) -> Result<Option<Value>, ActionError> {
    let envelope: ApiEnvelope<Value> = serde_json::from_slice(bytes)?;
    if !envelope.is_success() {
        return Err(ActionError::Backend {
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(envelope.data)
}

// 2. The Real Implementation
/// RestBackend
///
/// reqwest-backed transport. The envelope is parsed whatever the HTTP status
/// is; only the envelope code decides success.
#[derive(Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn send(&self, request: BackendRequest) -> Result<Option<Value>, ActionError> {
        let url = format!("{}{}", self.base_url, request.endpoint);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            status = status.as_u16(),
            "backend call completed"
        );

        unwrap_envelope(&bytes)
    }
}

// 3. The Mock Implementation (For Tests)
/// MockReply
///
/// A canned backend outcome. Envelopes go through `unwrap_envelope` exactly
/// like a real response body would.
#[derive(Debug)]
pub enum MockReply {
    Envelope(Value),
    Failure(ActionError),
}

/// MockBackend
///
/// Replays queued replies in order and records every request it receives.
/// With the queue empty it answers `{code: 200, data: null}`.
#[derive(Debug, Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful envelope carrying `data`.
    pub fn with_data(self, data: Value) -> Self {
        self.push(MockReply::Envelope(serde_json::json!({
            "code": 200,
            "message": "ok",
            "data": data,
        })));
        self
    }

    /// Queues a raw envelope, success or not.
    pub fn with_envelope(self, envelope: Value) -> Self {
        self.push(MockReply::Envelope(envelope));
        self
    }

    /// Queues a failure that never reached the envelope stage.
    pub fn with_failure(self, error: ActionError) -> Self {
        self.push(MockReply::Failure(error));
        self
    }

    pub fn push(&self, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, request: BackendRequest) -> Result<Option<Value>, ActionError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        match reply {
            Some(MockReply::Envelope(envelope)) => unwrap_envelope(&serde_json::to_vec(&envelope)?),
            Some(MockReply::Failure(error)) => Err(error),
            None => Ok(None),
        }
    }
}
