//! # Application State
//!
//! Core business state for parley. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn SessionApi>       // backend client
//! ├── phase: Phase                   // session lifecycle
//! ├── phone: String                  // last submitted phone (pre-session)
//! ├── session_id: Option<String>     // server-assigned id, set on init
//! ├── conversation: ConversationState// last server snapshot, replaced wholesale
//! ├── status_message: String         // status bar text
//! └── error: Option<String>          // error surfaced on the landing screen
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::api::{ConversationState, SessionApi};

/// Session lifecycle. The backend drives the AwaitingUser/Complete split;
/// Processing is the client-side gate that keeps requests serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session yet; the input box captures a phone number.
    Unstarted,
    /// A request is in flight. All start/send actions are ignored.
    Processing,
    /// The backend expects the next input from the user.
    AwaitingUser,
    /// Terminal: the conversation reached an outcome. No further sends.
    Complete,
}

pub struct App {
    pub api: Arc<dyn SessionApi>,
    pub phase: Phase,
    pub phone: String,
    pub session_id: Option<String>,
    pub conversation: ConversationState,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(api: Arc<dyn SessionApi>) -> Self {
        Self {
            api,
            phase: Phase::Unstarted,
            phone: String::new(),
            session_id: None,
            conversation: ConversationState::default(),
            status_message: String::from("Welcome to parley"),
            error: None,
        }
    }

    /// True while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Processing
    }

    /// Whether the input control accepts text right now. Pre-session it
    /// captures the phone number; in-session only while the backend is
    /// waiting on the user.
    pub fn input_enabled(&self) -> bool {
        match self.phase {
            Phase::Unstarted => true,
            Phase::AwaitingUser => self.conversation.accepts_input(),
            Phase::Processing | Phase::Complete => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.phase, Phase::Unstarted);
        assert!(app.session_id.is_none());
        assert!(app.conversation.messages.is_empty());
        assert!(!app.is_loading());
        assert!(app.input_enabled());
    }

    #[test]
    fn test_input_disabled_while_processing_and_complete() {
        let mut app = test_app();
        app.phase = Phase::Processing;
        assert!(!app.input_enabled());

        app.phase = Phase::Complete;
        assert!(!app.input_enabled());
    }

    #[test]
    fn test_input_respects_awaiting_user_flag() {
        let mut app = test_app();
        app.phase = Phase::AwaitingUser;
        app.conversation.awaiting_user = true;
        assert!(app.input_enabled());

        // Defensive: a stale awaiting_user on a completed conversation
        // must not re-enable input.
        app.conversation.is_complete = true;
        assert!(!app.input_enabled());
    }
}
