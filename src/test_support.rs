//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{ClientError, ConversationState, Message, SessionApi};

/// A no-op backend for tests that never touch the network.
pub struct NoopApi;

#[async_trait]
impl SessionApi for NoopApi {
    async fn initiate(&self, _phone: &str) -> Result<ConversationState, ClientError> {
        Ok(ConversationState::default())
    }

    async fn send_message(
        &self,
        _session_id: &str,
        _user_input: &str,
    ) -> Result<ConversationState, ClientError> {
        Ok(ConversationState::default())
    }
}

/// Creates a test App with a NoopApi.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopApi))
}

/// A server snapshot parked on the user's turn.
pub fn awaiting_state(session_id: &str, messages: Vec<Message>) -> ConversationState {
    ConversationState {
        session_id: session_id.to_string(),
        messages,
        awaiting_user: true,
        is_complete: false,
        ..Default::default()
    }
}
