//! HTTP client for the two backend operations: initiate a session and send
//! a message.
//!
//! Both calls follow the same contract: validate inputs before touching the
//! network, POST JSON, and on a non-2xx status surface the raw response body
//! as the error message. No retries, no timeouts, no idempotency keys — at
//! most one attempt per call, and the caller decides whether to retry.

use async_trait::async_trait;
use log::{debug, warn};
use std::fmt;

use super::types::{ChatRequest, ConversationState, InitRequest};

/// Errors from session operations.
#[derive(Debug)]
pub enum ClientError {
    /// Empty phone, session id, or user input. Caught before any network
    /// call is made.
    Validation(String),
    /// The server answered with a non-success status. Carries the raw
    /// response body text.
    Transport { status: u16, body: String },
    /// The request could not complete (DNS, connection refused, dropped
    /// connection).
    Network(String),
    /// The response body was not a decodable ConversationState.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(msg) => write!(f, "validation error: {msg}"),
            ClientError::Transport { status, body } => {
                write!(f, "server error (HTTP {status}): {body}")
            }
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// The session operations the controller needs. A trait seam so the TUI can
/// be driven by a test double without a live backend.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Start a new session for a phone number. Returns the initial state,
    /// including the server-assigned `session_id`.
    async fn initiate(&self, phone: &str) -> Result<ConversationState, ClientError>;

    /// Send one user message and receive the full replacement state.
    async fn send_message(
        &self,
        session_id: &str,
        user_input: &str,
    ) -> Result<ConversationState, ClientError>;
}

/// reqwest-backed implementation against a fixed base URL
/// (e.g. `http://localhost:8000/api`).
pub struct SessionClient {
    base_url: String,
    client: reqwest::Client,
}

impl SessionClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// POST `body` to `{base_url}{path}` and decode the replacement state.
    async fn post_state<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ConversationState, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("POST {} failed: {} - {}", url, status, body);
            return Err(ClientError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ConversationState>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SessionApi for SessionClient {
    async fn initiate(&self, phone: &str) -> Result<ConversationState, ClientError> {
        if phone.trim().is_empty() {
            return Err(ClientError::Validation(
                "phone number is required to start a session".to_string(),
            ));
        }
        self.post_state("/init", &InitRequest { phone }).await
    }

    async fn send_message(
        &self,
        session_id: &str,
        user_input: &str,
    ) -> Result<ConversationState, ClientError> {
        if session_id.trim().is_empty() {
            return Err(ClientError::Validation(
                "session id is required".to_string(),
            ));
        }
        if user_input.trim().is_empty() {
            return Err(ClientError::Validation(
                "user input cannot be empty".to_string(),
            ));
        }
        self.post_state(
            "/chat",
            &ChatRequest {
                session_id,
                user_input,
            },
        )
        .await
    }
}
