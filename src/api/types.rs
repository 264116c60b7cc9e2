//! Wire types for the negotiation backend.
//!
//! The server is the sole source of truth for conversation history: every
//! response carries the full [`ConversationState`], and the client replaces
//! its copy wholesale. Nothing here merges or reorders messages.

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single conversation turn. Immutable once created; ordering is
/// append-only and significant (render order = conversation order).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A payment plan the backend has put on the table. Display-only: the
/// server decides when plans appear, and selecting one is just a normal
/// text message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentPlan {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Full snapshot of a session as last reported by the backend.
///
/// `/api/init` includes `session_id`; `/api/chat` omits it, so the field
/// defaults and the controller keeps the id it was given at initiation.
/// `stage` and `offered_plans` are optional affordances the server may or
/// may not populate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ConversationState {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub awaiting_user: bool,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub offered_plans: Vec<PaymentPlan>,
}

impl ConversationState {
    /// Whether the UI should accept a send action. A completed conversation
    /// never accepts input, regardless of what `awaiting_user` claims.
    pub fn accepts_input(&self) -> bool {
        self.awaiting_user && !self.is_complete
    }
}

/// Request body for `POST /api/init`.
#[derive(Serialize, Debug)]
pub struct InitRequest<'a> {
    pub phone: &'a str,
}

/// Request body for `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub user_input: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the init request must serialize to exactly the JSON
    /// the backend expects.
    #[test]
    fn test_init_request_serialization() {
        let req = InitRequest {
            phone: "5551234567",
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"phone":"5551234567"}"#);
    }

    #[test]
    fn test_chat_request_serialization() {
        let req = ChatRequest {
            session_id: "abc",
            user_input: "I can pay $50/month",
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(
            serialized,
            r#"{"session_id":"abc","user_input":"I can pay $50/month"}"#
        );
    }

    #[test]
    fn test_decode_init_response() {
        let json = r#"{
            "session_id": "abc",
            "messages": [{"role": "assistant", "content": "Hello"}],
            "stage": "greeting",
            "awaiting_user": true,
            "is_complete": false,
            "offered_plans": []
        }"#;
        let state: ConversationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.session_id, "abc");
        assert_eq!(state.messages, vec![Message::assistant("Hello")]);
        assert_eq!(state.stage.as_deref(), Some("greeting"));
        assert!(state.awaiting_user);
        assert!(!state.is_complete);
        assert!(state.offered_plans.is_empty());
    }

    /// The chat endpoint omits `session_id`; decoding must not fail and the
    /// field must default to empty.
    #[test]
    fn test_decode_chat_response_without_session_id() {
        let json = r#"{
            "messages": [
                {"role": "user", "content": "I can pay $50/month"},
                {"role": "assistant", "content": "Deal accepted"}
            ],
            "stage": "closing",
            "awaiting_user": false,
            "is_complete": true,
            "offered_plans": []
        }"#;
        let state: ConversationState = serde_json::from_str(json).unwrap();
        assert!(state.session_id.is_empty());
        assert_eq!(state.messages.len(), 2);
        assert!(state.is_complete);
    }

    #[test]
    fn test_decode_sparse_response_uses_defaults() {
        // A minimal body still decodes; all flags default to false.
        let state: ConversationState = serde_json::from_str(r#"{"session_id":"x"}"#).unwrap();
        assert!(state.messages.is_empty());
        assert!(!state.awaiting_user);
        assert!(!state.is_complete);
        assert!(state.stage.is_none());
    }

    #[test]
    fn test_decode_offered_plans() {
        let json = r#"{
            "session_id": "abc",
            "awaiting_user": true,
            "offered_plans": [
                {"name": "Plan A", "description": "3 months, $100/month"},
                {"name": "Plan B"}
            ]
        }"#;
        let state: ConversationState = serde_json::from_str(json).unwrap();
        assert_eq!(state.offered_plans.len(), 2);
        assert_eq!(state.offered_plans[0].name, "Plan A");
        assert_eq!(state.offered_plans[1].description, "");
    }

    #[test]
    fn test_accepts_input_complete_wins_over_awaiting_user() {
        // Defensive: a completed conversation never accepts input, even if
        // the server left awaiting_user set.
        let state = ConversationState {
            awaiting_user: true,
            is_complete: true,
            ..Default::default()
        };
        assert!(!state.accepts_input());
    }

    #[test]
    fn test_accepts_input_requires_awaiting_user() {
        let state = ConversationState {
            awaiting_user: false,
            is_complete: false,
            ..Default::default()
        };
        assert!(!state.accepts_input());

        let state = ConversationState {
            awaiting_user: true,
            is_complete: false,
            ..Default::default()
        };
        assert!(state.accepts_input());
    }
}
